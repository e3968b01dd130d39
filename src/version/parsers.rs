extern crate nom;

use nom::{
    bytes::complete::tag,
    character::complete::{char, digit1, space1},
    combinator::map_res,
    sequence::{preceded, separated_pair},
    IResult,
};

pub fn parse_number(input: &str) -> IResult<&str, u32> {
    map_res(digit1, |digits: &str| digits.parse::<u32>())(input)
}

pub fn parse_version_prefix(input: &str) -> IResult<&str, &str> {
    let (input, prefix) = tag("VER")(input)?;
    let (input, _) = space1(input)?;

    Ok((input, prefix))
}

pub fn parse_major_minor(input: &str) -> IResult<&str, (u32, u32)> {
    preceded(
        parse_version_prefix,
        separated_pair(parse_number, char('.'), parse_number),
    )(input)
}
