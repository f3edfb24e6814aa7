//! 学生と成績を管理する名簿
//!
//! - interface: 要素やコンテナの振る舞いを表すトレイト
//! - data_structure: 要素の中身を知らない順序付きコンテナ
//! - roster: コンテナの上に載る学生・成績のロジック

pub mod data_structure;
pub mod interface;
pub mod roster;

pub use roster::{Roster, RosterError};
