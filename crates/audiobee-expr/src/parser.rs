//! Expression parser.
//!
//! Grammar, lowest precedence first:
//!
//! ```text
//! conditional := comparison ( "?" conditional ":" conditional )?
//! comparison  := additive ( ("<=" | ">=" | "==" | "!=" | "<" | ">") additive )*
//! additive    := term ( ("+" | "-") term )*
//! term        := unary ( ("*" | "/" | "%") unary )*
//! unary       := ("-" | "+") unary | power
//! power       := primary ( ("**" | "^") unary )?
//! primary     := number | identifier ( "(" arguments ")" )? | "(" conditional ")"
//! ```
//!
//! Power is right-associative and binds tighter than a leading minus, so
//! `-2^2` is -4 while `2^-1` is 0.5.

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{alpha1, alphanumeric1, char, digit0, digit1, multispace0, one_of},
    combinator::{all_consuming, cut, map, map_res, not, opt, recognize, value},
    multi::{many0, separated_list0},
    sequence::{delimited, pair, preceded, terminated, tuple},
    IResult,
};

use crate::ast::{BinaryOp, Expr};
use crate::error::{ExprError, ExprResult};

/// Parses a complete expression.
pub fn parse(source: &str) -> ExprResult<Expr> {
    match all_consuming(ws(conditional))(source) {
        Ok((_, expr)) => Ok(expr),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(syntax_error(source, e.input)),
        Err(nom::Err::Incomplete(_)) => Err(syntax_error(source, "")),
    }
}

fn syntax_error(source: &str, remaining: &str) -> ExprError {
    let offset = source.len() - remaining.len();
    let message = match remaining.chars().next() {
        Some(c) => format!("unexpected '{}'", c),
        None => "unexpected end of input".to_string(),
    };
    ExprError::Syntax { offset, message }
}

/// Wraps a parser so it skips surrounding whitespace.
fn ws<'a, F, O>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    delimited(multispace0, inner, multispace0)
}

/// Decimal literal: `1`, `1.5`, `1.`, `.5`, with an optional exponent.
///
/// Signs are handled by the unary rule, and `inf`/`nan` are not literals.
fn number(input: &str) -> IResult<&str, f64> {
    map_res(
        recognize(pair(
            alt((
                recognize(pair(digit1, opt(pair(char('.'), digit0)))),
                recognize(pair(char('.'), digit1)),
            )),
            opt(tuple((one_of("eE"), opt(one_of("+-")), digit1))),
        )),
        |s: &str| s.parse::<f64>(),
    )(input)
}

fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ))(input)
}

fn arguments(input: &str) -> IResult<&str, Vec<Expr>> {
    preceded(
        ws(char('(')),
        cut(terminated(
            separated_list0(char(','), ws(conditional)),
            ws(char(')')),
        )),
    )(input)
}

fn variable_or_call(input: &str) -> IResult<&str, Expr> {
    let (input, name) = identifier(input)?;
    let (input, args) = opt(arguments)(input)?;
    let expr = match args {
        Some(args) => Expr::Call(name.to_string(), args),
        None => Expr::Variable(name.to_string()),
    };
    Ok((input, expr))
}

fn parenthesized(input: &str) -> IResult<&str, Expr> {
    preceded(char('('), cut(terminated(ws(conditional), char(')'))))(input)
}

fn primary(input: &str) -> IResult<&str, Expr> {
    ws(alt((map(number, Expr::Number), variable_or_call, parenthesized)))(input)
}

fn power(input: &str) -> IResult<&str, Expr> {
    let (input, base) = primary(input)?;
    let (input, exponent) = opt(preceded(alt((tag("**"), tag("^"))), cut(unary)))(input)?;
    let expr = match exponent {
        Some(exponent) => Expr::Binary(BinaryOp::Pow, Box::new(base), Box::new(exponent)),
        None => base,
    };
    Ok((input, expr))
}

fn unary(input: &str) -> IResult<&str, Expr> {
    alt((
        map(preceded(ws(char('-')), cut(unary)), |e| Expr::Neg(Box::new(e))),
        preceded(ws(char('+')), cut(unary)),
        power,
    ))(input)
}

/// Parses `operand (operator operand)*` into a left-leaning tree.
fn left_assoc<'a, O, P>(
    input: &'a str,
    mut operator: O,
    mut operand: P,
) -> IResult<&'a str, Expr>
where
    O: FnMut(&'a str) -> IResult<&'a str, BinaryOp>,
    P: FnMut(&'a str) -> IResult<&'a str, Expr>,
{
    let (input, first) = operand(input)?;
    let (input, rest) = many0(pair(&mut operator, cut(&mut operand)))(input)?;
    let expr = rest.into_iter().fold(first, |acc, (op, rhs)| {
        Expr::Binary(op, Box::new(acc), Box::new(rhs))
    });
    Ok((input, expr))
}

fn term(input: &str) -> IResult<&str, Expr> {
    left_assoc(
        input,
        alt((
            value(BinaryOp::Mul, terminated(char('*'), not(char('*')))),
            value(BinaryOp::Div, char('/')),
            value(BinaryOp::Rem, char('%')),
        )),
        unary,
    )
}

fn additive(input: &str) -> IResult<&str, Expr> {
    left_assoc(
        input,
        alt((value(BinaryOp::Add, char('+')), value(BinaryOp::Sub, char('-')))),
        term,
    )
}

fn comparison(input: &str) -> IResult<&str, Expr> {
    left_assoc(
        input,
        alt((
            value(BinaryOp::Le, tag("<=")),
            value(BinaryOp::Ge, tag(">=")),
            value(BinaryOp::Eq, tag("==")),
            value(BinaryOp::Ne, tag("!=")),
            value(BinaryOp::Lt, tag("<")),
            value(BinaryOp::Gt, tag(">")),
        )),
        additive,
    )
}

fn conditional(input: &str) -> IResult<&str, Expr> {
    let (input, condition) = comparison(input)?;
    let (input, branches) = opt(preceded(
        char('?'),
        cut(pair(ws(conditional), preceded(char(':'), ws(conditional)))),
    ))(input)?;
    let expr = match branches {
        Some((then, otherwise)) => {
            Expr::Conditional(Box::new(condition), Box::new(then), Box::new(otherwise))
        }
        None => condition,
    };
    Ok((input, expr))
}
