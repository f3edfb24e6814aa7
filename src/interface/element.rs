use std::{
    error::Error,
    fmt::{self, Display},
};

/// 要素の複製に失敗したことを示すエラー
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloneError;

impl Display for CloneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CloneError: failed to duplicate element")
    }
}

impl Error for CloneError {}

/// コンテナに格納される要素の振る舞い
///
/// コンテナは要素の中身を知らない。
/// 複製(try_clone)と破棄(destroy)は要素側が提供する
pub trait Element: Sized {
    /// 要素を深く複製する。失敗した場合はCloneErrorを返す
    fn try_clone(&self) -> Result<Self, CloneError>;

    /// 要素を破棄する。必ず成功する
    fn destroy(self) {
        drop(self)
    }
}

/// Cloneを実装する型は、そのままElementとして扱える
macro_rules! impl_element_by_clone {
    ($($t:ty),*) => {
        $(
            impl Element for $t {
                fn try_clone(&self) -> Result<Self, CloneError> {
                    Ok(self.clone())
                }
            }
        )*
    };
}

impl_element_by_clone!(bool, char, i32, i64, u32, u64, usize, String);
