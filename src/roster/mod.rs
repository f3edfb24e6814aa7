mod student;

pub use student::{CourseRecord, Student, GRADE_MAX, GRADE_MIN};

use crate::data_structure::sl_list::{AllocError, Iter, SLList};
use crate::interface::element::{CloneError, Element};
use std::{
    collections::TryReserveError,
    error::Error,
    fmt::{self, Display},
    io::{self, Write},
};
use student::try_copy;

#[derive(Debug, PartialEq, Eq)]
pub enum RosterError {
    AllocationError,
    DuplicateId(i32),
    DuplicateCourse { id: i32, course: String },
    InvalidGrade(i32),
    StudentNotFound(i32),
    CloneError,
    Io(io::ErrorKind),
}

impl Display for RosterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RosterError::AllocationError => write!(f, "AllocationError: out of memory"),
            RosterError::DuplicateId(id) => write!(f, "DuplicateId: student {id} already exists"),
            RosterError::DuplicateCourse { id, course } => {
                write!(f, "DuplicateCourse: student {id} already has {course}")
            }
            RosterError::InvalidGrade(grade) => write!(
                f,
                "InvalidGrade: {grade} is not between {GRADE_MIN} and {GRADE_MAX}"
            ),
            RosterError::StudentNotFound(id) => write!(f, "StudentNotFound: no student {id}"),
            RosterError::CloneError => write!(f, "CloneError: failed to duplicate roster"),
            RosterError::Io(kind) => write!(f, "IoError: {kind}"),
        }
    }
}

impl Error for RosterError {}

impl From<TryReserveError> for RosterError {
    fn from(_: TryReserveError) -> Self {
        RosterError::AllocationError
    }
}

impl From<AllocError<Student>> for RosterError {
    fn from(e: AllocError<Student>) -> Self {
        e.into_inner().destroy();
        RosterError::AllocationError
    }
}

impl From<CloneError> for RosterError {
    fn from(_: CloneError) -> Self {
        RosterError::CloneError
    }
}

impl From<io::Error> for RosterError {
    fn from(e: io::Error) -> Self {
        RosterError::Io(e.kind())
    }
}

/// 学生の名簿
///
/// 学生は追加された順に並ぶ。idは名簿内で一意
/// 変更系の操作は、成功すれば全て反映され、失敗すれば何も変わらない
#[derive(Debug, Default)]
pub struct Roster {
    students: SLList<Student>,
}

impl Roster {
    pub fn new() -> Self {
        Self {
            students: SLList::new(),
        }
    }

    /// 学生の人数
    pub fn size(&self) -> usize {
        self.students.size()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    /// 追加された順に学生を辿る
    pub fn students(&self) -> Iter<'_, Student> {
        self.students.iter()
    }

    /// idを持つ学生を先頭から探す
    pub fn student(&self, id: i32) -> Option<&Student> {
        self.students.iter().find(|s| s.id() == id)
    }

    fn find(&self, id: i32) -> Result<&Student, RosterError> {
        self.student(id).ok_or(RosterError::StudentNotFound(id))
    }

    /// 科目を持たない学生を末尾に追加する
    pub fn add_student(&mut self, name: &str, id: i32) -> Result<(), RosterError> {
        if self.student(id).is_some() {
            return Err(RosterError::DuplicateId(id));
        }
        let student = Student::try_new(name, id)?;
        self.students.push_back(student)?;
        Ok(())
    }

    /// idの学生に科目courseの成績gradeを追加する
    ///
    /// 判定の順番は、成績の範囲、学生の有無、科目の重複
    pub fn add_grade(&mut self, course: &str, id: i32, grade: i32) -> Result<(), RosterError> {
        if !(GRADE_MIN..=GRADE_MAX).contains(&grade) {
            return Err(RosterError::InvalidGrade(grade));
        }
        let student = self
            .students
            .find_mut(|s| s.id() == id)
            .ok_or(RosterError::StudentNotFound(id))?;
        student.add_course(course, grade)
    }

    /// idの学生の平均と、名前の複製を返す。科目がなければ平均は0
    pub fn average(&self, id: i32) -> Result<(f64, String), RosterError> {
        let student = self.find(id)?;
        let name = try_copy(student.name())?;
        Ok((student.average(), name))
    }

    /// print_studentが出力する1行(改行なし)
    pub fn student_line(&self, id: i32) -> Result<String, RosterError> {
        Ok(self.find(id)?.to_string())
    }

    /// idの学生の行をoutに書き込む。学生がいなければ何も書かない
    pub fn write_student<W: Write>(&self, out: &mut W, id: i32) -> Result<(), RosterError> {
        let student = self.find(id)?;
        writeln!(out, "{student}")?;
        Ok(())
    }

    /// 全ての学生の行を、追加された順にoutへ書き込む
    pub fn write_all<W: Write>(&self, out: &mut W) -> Result<(), RosterError> {
        for student in &self.students {
            writeln!(out, "{student}")?;
        }
        Ok(())
    }

    pub fn print_student(&self, id: i32) -> Result<(), RosterError> {
        self.write_student(&mut io::stdout().lock(), id)
    }

    pub fn print_all(&self) -> Result<(), RosterError> {
        self.write_all(&mut io::stdout().lock())
    }

    /// 名簿全体を深く複製する
    pub fn try_clone(&self) -> Result<Self, RosterError> {
        Ok(Self {
            students: self.students.try_clone()?,
        })
    }

    /// 全ての学生と科目をまとめて解放する
    pub fn destroy(self) {
        self.students.destroy()
    }
}
