mod command;
mod helper;
mod shell;

use helper::DynError;
use std::env;

/// ヒストリファイルの既定値
const HISTORY_FILE: &str = ".roster_history";

/// 名簿を操作する対話シェル
///
/// 引数にヒストリファイルを指定できる。省略した場合は.roster_history
fn main() -> Result<(), DynError> {
    let args: Vec<String> = env::args().collect();
    let logfile = args.get(1).map(String::as_str).unwrap_or(HISTORY_FILE);
    shell::Shell::new(logfile).run()
}
