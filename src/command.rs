use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{char, digit1, multispace0, multispace1},
    combinator::{all_consuming, map, map_res, opt, recognize, value},
    sequence::{delimited, pair, preceded},
    IResult,
};

/// シェルが受け付けるコマンド
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddStudent { name: String, id: i32 },         // student NAME ID
    AddGrade { course: String, id: i32, grade: i32 }, // grade COURSE ID GRADE
    Average(i32),                                 // avg ID
    Print(i32),                                   // print ID
    PrintAll,                                     // all
    Size,                                         // size
    Help,                                         // help | h
    Exit,                                         // exit | quit
}

// 整数のパーサ
// 範囲外の成績も名簿側で弾くため、負の数も受け付ける
fn parse_int(c: &str) -> IResult<&str, i32> {
    map_res(recognize(pair(opt(char('-')), digit1)), |s: &str| {
        s.parse::<i32>()
    })(c)
}

// 文字列のパーサ
// "Data Structures"のように""で囲めば空白を含められる
fn parse_text(c: &str) -> IResult<&str, String> {
    let quoted = delimited(char('"'), take_while1(|ch: char| ch != '"'), char('"'));
    let bare = take_while1(|ch: char| !ch.is_whitespace() && ch != '"');
    map(alt((quoted, bare)), |s: &str| s.to_string())(c)
}

fn parse_add_student(c: &str) -> IResult<&str, Command> {
    let (c, _) = tag("student")(c)?;
    let (c, name) = preceded(multispace1, parse_text)(c)?;
    let (c, id) = preceded(multispace1, parse_int)(c)?;
    Ok((c, Command::AddStudent { name, id }))
}

fn parse_add_grade(c: &str) -> IResult<&str, Command> {
    let (c, _) = tag("grade")(c)?;
    let (c, course) = preceded(multispace1, parse_text)(c)?;
    let (c, id) = preceded(multispace1, parse_int)(c)?;
    let (c, grade) = preceded(multispace1, parse_int)(c)?;
    Ok((c, Command::AddGrade { course, id, grade }))
}

fn parse_average(c: &str) -> IResult<&str, Command> {
    let (c, _) = tag("avg")(c)?;
    let (c, id) = preceded(multispace1, parse_int)(c)?;
    Ok((c, Command::Average(id)))
}

fn parse_print(c: &str) -> IResult<&str, Command> {
    let (c, _) = tag("print")(c)?;
    let (c, id) = preceded(multispace1, parse_int)(c)?;
    Ok((c, Command::Print(id)))
}

// コマンドのトップをパースする
fn parse_command(c: &str) -> IResult<&str, Command> {
    all_consuming(delimited(
        multispace0,
        alt((
            parse_add_student,
            parse_add_grade,
            parse_average,
            parse_print,
            value(Command::PrintAll, tag("all")),
            value(Command::Size, tag("size")),
            value(Command::Help, alt((tag("help"), tag("h")))),
            value(Command::Exit, alt((tag("exit"), tag("quit")))),
        )),
        multispace0,
    ))(c)
}

/// 1行をコマンドに変換する。失敗した場合はエラーを表示してNone
pub fn parse(line: &str) -> Option<Command> {
    match parse_command(line) {
        Ok((_, cmd)) => Some(cmd),
        Err(e) => {
            eprintln!("<<コマンドを解釈できません: {e}>>");
            None
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_add_student() {
        assert_eq!(
            parse("student Alon 234"),
            Some(Command::AddStudent {
                name: "Alon".to_string(),
                id: 234
            })
        );
        assert_eq!(
            parse("  student \"Dana Levi\"   1  "),
            Some(Command::AddStudent {
                name: "Dana Levi".to_string(),
                id: 1
            })
        );
        assert_eq!(parse("student Alon"), None);
        assert_eq!(parse("student Alon x"), None);
    }

    #[test]
    fn test_add_grade() {
        assert_eq!(
            parse("grade \"Data Structures\" 234 100"),
            Some(Command::AddGrade {
                course: "Data Structures".to_string(),
                id: 234,
                grade: 100
            })
        );
        assert_eq!(
            parse("grade OS 234 -5"),
            Some(Command::AddGrade {
                course: "OS".to_string(),
                id: 234,
                grade: -5
            })
        );
        assert_eq!(parse("grade OS 234 99999999999"), None);
    }

    #[test]
    fn test_simple_commands() {
        assert_eq!(parse("avg 234"), Some(Command::Average(234)));
        assert_eq!(parse("print 1"), Some(Command::Print(1)));
        assert_eq!(parse("all"), Some(Command::PrintAll));
        assert_eq!(parse("size"), Some(Command::Size));
        assert_eq!(parse("help"), Some(Command::Help));
        assert_eq!(parse("h"), Some(Command::Help));
        assert_eq!(parse("exit"), Some(Command::Exit));
        assert_eq!(parse("quit"), Some(Command::Exit));
    }

    #[test]
    fn test_invalid() {
        assert_eq!(parse(""), None);
        assert_eq!(parse("allx"), None);
        assert_eq!(parse("print"), None);
        assert_eq!(parse("grade \"OS 1 2"), None);
    }
}
