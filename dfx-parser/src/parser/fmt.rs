//! LaTeX rendering of expression trees.

use std::fmt::{Display, Formatter, Result};
use super::ast::{Assignment, Binary, BinOpKind, Differentiation, Expr, Invocation};

/// A trait for types that can be formatted as LaTeX.
pub trait Latex {
    /// Format the value as LaTeX.
    fn fmt_latex(&self, f: &mut Formatter) -> Result;

    /// Wraps the value in a [`LatexFormatter`], which implements [`Display`].
    fn as_display(&self) -> LatexFormatter<'_, Self> {
        LatexFormatter(self)
    }
}

/// A wrapper type that implements [`Display`] for any type that implements [`Latex`].
pub struct LatexFormatter<'a, T: ?Sized>(&'a T);

impl<T: ?Sized> Display for LatexFormatter<'_, T>
where
    T: Latex,
{
    fn fmt(&self, f: &mut Formatter) -> Result {
        self.0.fmt_latex(f)
    }
}

/// Formats `expr`, wrapping it in `\left(` and `\right)` if `parens` is true.
fn fmt_grouped(f: &mut Formatter, expr: &Expr, parens: bool) -> Result {
    if parens {
        write!(f, "\\left(")?;
        expr.fmt_latex(f)?;
        write!(f, "\\right)")
    } else {
        expr.fmt_latex(f)
    }
}

/// Helper to format powers.
fn fmt_pow(f: &mut Formatter, base: &Expr, exponent: &Expr) -> Result {
    let parens = base.precedence() <= BinOpKind::Exp.precedence();
    fmt_grouped(f, base, parens)?;
    write!(f, "^{{")?;
    exponent.fmt_latex(f)?;
    write!(f, "}}")
}

impl Latex for Binary {
    fn fmt_latex(&self, f: &mut Formatter) -> Result {
        match self.op {
            BinOpKind::Exp => fmt_pow(f, &self.lhs, &self.rhs),
            BinOpKind::Div => {
                write!(f, "\\frac{{")?;
                self.lhs.fmt_latex(f)?;
                write!(f, "}}{{")?;
                self.rhs.fmt_latex(f)?;
                write!(f, "}}")
            },
            BinOpKind::Log => {
                if self.lhs.is_e() {
                    write!(f, "\\ln\\left(")?;
                } else {
                    write!(f, "\\log_{{")?;
                    self.lhs.fmt_latex(f)?;
                    write!(f, "}}\\left(")?;
                }
                self.rhs.fmt_latex(f)?;
                write!(f, "\\right)")
            },
            op => {
                let outer = op.precedence();
                fmt_grouped(f, &self.lhs, self.lhs.precedence() < outer)?;
                match op {
                    BinOpKind::Add => write!(f, " + ")?,
                    BinOpKind::Sub => write!(f, " - ")?,
                    _ => write!(f, " \\cdot ")?,
                }
                let inner = self.rhs.precedence();
                fmt_grouped(f, &self.rhs, inner < outer || (inner == outer && op == BinOpKind::Sub))
            },
        }
    }
}

impl Latex for Invocation {
    fn fmt_latex(&self, f: &mut Formatter) -> Result {
        match &*self.callee {
            Expr::Function(name) => write!(f, "\\mathrm{{{}}}", name)?,
            callee => fmt_grouped(f, callee, true)?,
        }
        write!(f, "\\left(")?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            arg.fmt_latex(f)?;
        }
        write!(f, "\\right)")
    }
}

impl Latex for Differentiation {
    fn fmt_latex(&self, f: &mut Formatter) -> Result {
        match &self.respect {
            Some(respect) => write!(f, "\\frac{{d}}{{d{}}}", respect)?,
            None => write!(f, "\\frac{{d}}{{d\\cdot}}")?,
        }
        fmt_grouped(f, &self.expr, true)
    }
}

impl Latex for Assignment {
    fn fmt_latex(&self, f: &mut Formatter) -> Result {
        self.header.to_invocation().fmt_latex(f)?;
        write!(f, " = ")?;
        self.body.fmt_latex(f)
    }
}

impl Latex for Expr {
    fn fmt_latex(&self, f: &mut Formatter) -> Result {
        match self {
            Expr::Constant(value) => write!(f, "{}", value),
            Expr::E => write!(f, "e"),
            Expr::Function(name) => write!(f, "{}", name),
            Expr::Invocation(invocation) => invocation.fmt_latex(f),
            Expr::Differentiation(differentiation) => differentiation.fmt_latex(f),
            Expr::Assignment(assignment) => assignment.fmt_latex(f),
            Expr::Binary(binary) => binary.fmt_latex(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::parser::Parser;
    use super::*;

    fn latex(source: &str) -> String {
        let expr = Parser::new(source).unwrap().parse_stmt().unwrap();
        expr.as_display().to_string()
    }

    #[test]
    fn fraction_and_power() {
        assert_eq!(latex("(x + 1) / x^2"), "\\frac{x + 1}{x^{2}}");
        assert_eq!(latex("(x + 1)^2"), "\\left(x + 1\\right)^{2}");
    }

    #[test]
    fn logarithms() {
        assert_eq!(latex("ln(x)"), "\\ln\\left(x\\right)");
        assert_eq!(latex("log(2, x)"), "\\log_{2}\\left(x\\right)");
    }

    #[test]
    fn products_and_derivatives() {
        assert_eq!(latex("2 * (a - b)"), "2 \\cdot \\left(a - b\\right)");
        assert_eq!(latex("deriv(x^3, x)"), "\\frac{d}{dx}\\left(x^{3}\\right)");
        assert_eq!(latex("deriv(x^3)"), "\\frac{d}{d\\cdot}\\left(x^{3}\\right)");
        assert_eq!(latex("f(x) = x"), "\\mathrm{f}\\left(x\\right) = x");
    }
}
