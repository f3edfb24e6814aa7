use std::{
    collections::TryReserveError,
    fmt::{self, Display},
};

use super::RosterError;
use crate::interface::element::{CloneError, Element};

pub const GRADE_MIN: i32 = 0;
pub const GRADE_MAX: i32 = 100;

/// 文字列を複製する。領域を確保できなければエラーを返す
pub(crate) fn try_copy(s: &str) -> Result<String, TryReserveError> {
    let mut t = String::new();
    t.try_reserve_exact(s.len())?;
    t.push_str(s);
    Ok(t)
}

/// 科目名と成績の組
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseRecord {
    name: String,
    grade: i32,
}

impl CourseRecord {
    fn try_new(name: &str, grade: i32) -> Result<Self, TryReserveError> {
        Ok(Self {
            name: try_copy(name)?,
            grade,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn grade(&self) -> i32 {
        self.grade
    }
}

impl Display for CourseRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.grade)
    }
}

/// 学生
///
/// idは生成時に一度だけ決まり、以後変わらない。
/// coursesは追加された順に並び、同じ科目名(大文字小文字を区別)は二度現れない
#[derive(Debug, PartialEq, Eq)]
pub struct Student {
    name: String,
    id: i32,
    courses: Vec<CourseRecord>,
}

impl Student {
    pub(crate) fn try_new(name: &str, id: i32) -> Result<Self, TryReserveError> {
        Ok(Self {
            name: try_copy(name)?,
            id,
            courses: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn courses(&self) -> &[CourseRecord] {
        &self.courses
    }

    /// 名前が完全に一致する科目を返す
    pub fn course(&self, name: &str) -> Option<&CourseRecord> {
        self.courses.iter().find(|c| c.name == name)
    }

    /// 科目を末尾に追加する
    ///
    /// 同名の科目が既にある場合はDuplicateCourse。
    /// 失敗した場合、coursesは変更されない
    pub(crate) fn add_course(&mut self, name: &str, grade: i32) -> Result<(), RosterError> {
        if self.course(name).is_some() {
            return Err(RosterError::DuplicateCourse {
                id: self.id,
                course: name.to_string(),
            });
        }
        let course = CourseRecord::try_new(name, grade)?;
        self.courses.try_reserve(1)?;
        self.courses.push(course);
        Ok(())
    }

    /// 成績の平均。科目がなければ0
    pub fn average(&self) -> f64 {
        if self.courses.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.courses.iter().map(|c| f64::from(c.grade)).sum();
        sum / self.courses.len() as f64
    }
}

/// NAME ID: C1 G1, C2 G2, ..., Cn Gn
///
/// 科目がない場合は「NAME ID:」で終わる(末尾に空白は付かない)
impl Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}:", self.name, self.id)?;
        for (i, c) in self.courses.iter().enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            write!(f, "{sep}{c}")?;
        }
        Ok(())
    }
}

impl Element for Student {
    fn try_clone(&self) -> Result<Self, CloneError> {
        let mut courses = Vec::new();
        courses
            .try_reserve_exact(self.courses.len())
            .map_err(|_| CloneError)?;
        for c in &self.courses {
            courses.push(CourseRecord::try_new(&c.name, c.grade).map_err(|_| CloneError)?);
        }
        Ok(Self {
            name: try_copy(&self.name).map_err(|_| CloneError)?,
            id: self.id,
            courses,
        })
    }
}
