use crate::{
    command::{self, Command},
    helper::DynError,
};
use roster::Roster;
use rustyline::{error::ReadlineError, Editor};

#[derive(Debug)]
pub struct Shell {
    logfile: String, // ヒストリファイル
}

impl Shell {
    pub fn new(logfile: &str) -> Self {
        Shell {
            logfile: logfile.to_string(),
        }
    }

    /// 1行ずつコマンドを読み込み、名簿を操作する
    pub fn run(&self) -> Result<(), DynError> {
        let mut rl = Editor::<()>::new()?;
        if let Err(e) = rl.load_history(&self.logfile) {
            eprintln!("<<ヒストリファイルの読み込みに失敗: {e}>>");
        }

        let mut roster = Roster::new();
        let mut result = Ok(());

        loop {
            match rl.readline("roster> ") {
                Ok(line) => {
                    let line_trimed = line.trim();
                    if line_trimed.is_empty() {
                        continue; // 空のコマンドの場合は再読み込み
                    }
                    rl.add_history_entry(line_trimed);

                    if let Some(cmd) = command::parse(line_trimed) {
                        if !do_cmd(&mut roster, cmd) {
                            break;
                        }
                    }
                }
                // Ctrl+cでは終了させない
                Err(ReadlineError::Interrupted) => eprintln!("<<終了はCtrl+d>>"),
                Err(ReadlineError::Eof) => break,
                Err(e) => {
                    eprintln!("<<読み込みエラー: {e}>>");
                    result = Err(e.into());
                    break;
                }
            }
        }

        if let Err(e) = rl.save_history(&self.logfile) {
            eprintln!("<<ヒストリファイルへの書き込みに失敗: {e}>>");
        }
        roster.destroy();
        result
    }
}

/// コマンドを実行する。終了する場合はfalseを返す
///
/// 名簿の操作に失敗した場合は、エラーを表示して続行する
fn do_cmd(roster: &mut Roster, cmd: Command) -> bool {
    let result = match cmd {
        Command::AddStudent { name, id } => roster.add_student(&name, id),
        Command::AddGrade { course, id, grade } => roster.add_grade(&course, id, grade),
        Command::Average(id) => roster
            .average(id)
            .map(|(avg, name)| println!("{name}: {avg:.2}")),
        Command::Print(id) => roster.print_student(id),
        Command::PrintAll => roster.print_all(),
        Command::Size => {
            println!("{}", roster.size());
            Ok(())
        }
        Command::Help => {
            do_help();
            Ok(())
        }
        Command::Exit => return false,
    };

    if let Err(e) = result {
        eprintln!("<<{e}>>");
    }
    true
}

fn do_help() {
    println!(
        r#"コマンド一覧 (括弧内は省略記法)
student NAME ID         : 学生を追加
grade COURSE ID GRADE   : 成績を追加 (GRADEは0から100)
avg ID                  : 平均を表示
print ID                : 学生の成績を表示
all                     : 全学生の成績を追加順に表示
size                    : 学生の人数を表示
help (h)                : このヘルプを表示
exit (quit)             : 終了

空白を含む名前は"Data Structures"のように""で囲む"#
    );
}
