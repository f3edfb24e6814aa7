/// FIFO(first-in-first-out 先入れ先だし)キュー
///
/// 追加は失敗しうる。失敗した場合、値は呼び出し元へ返される
pub trait Queue<T> {
    /// 追加に失敗したときのエラー
    type Error;

    /// 値xをQueueの末尾に追加する
    fn add(&mut self, x: T) -> Result<(), Self::Error>;

    /// 以前に追加された「次の値」yをQueueから削除し、yを返す
    fn remove(&mut self) -> Option<T>;
}
