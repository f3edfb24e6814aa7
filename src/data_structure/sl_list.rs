use std::{
    error::Error,
    fmt::{self, Debug, Display},
};

use crate::interface::element::{CloneError, Element};
use crate::interface::queue::Queue;

pub struct Node<T> {
    x: Option<T>, // 削除済みのノードはNone
    next: Option<usize>,
}

impl<T> Node<T> {
    fn new(x: T) -> Self {
        Self {
            x: Some(x),
            next: None,
        }
    }
}

/// 領域を確保できずに追加に失敗したことを示すエラー
///
/// 追加しようとした値を保持しており、所有権は呼び出し元へ戻る
#[derive(PartialEq, Eq)]
pub struct AllocError<T>(pub T);

impl<T> AllocError<T> {
    /// 追加できなかった値を取り出す
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Debug for AllocError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AllocError(..)")
    }
}

impl<T> Display for AllocError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AllocError: failed to grow list storage")
    }
}

impl<T> Error for AllocError<T> {}

/// Singley-Linked List(単方向連結リスト)
///
/// ノードは配列(nodes)上に置き、nextには次のノードの添字を持つ。
/// 削除したノードの添字はfreeに積んでおき、次の追加で再利用する
///
/// 要素の複製と破棄はElementに任せる。リストは要素の中身を知らない
/// push_back(x), pop_front()の実行時間はいずれもO(1)
pub struct SLList<T: Element> {
    nodes: Vec<Node<T>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    n: usize,
}

impl<T: Element> SLList<T> {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            n: 0,
        }
    }

    /// リストの長さnを返す
    pub fn size(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// xを末尾に追加する
    ///
    /// 領域を確保できない場合はリストを変更せず、xをAllocErrorに包んで返す
    pub fn push_back(&mut self, x: T) -> Result<(), AllocError<T>> {
        let i = if let Some(i) = self.free.pop() {
            self.nodes[i] = Node::new(x);
            i
        } else {
            if self.nodes.try_reserve(1).is_err() {
                return Err(AllocError(x));
            }
            self.nodes.push(Node::new(x));
            self.nodes.len() - 1
        };

        match self.tail {
            Some(t) => self.nodes[t].next = Some(i),
            None => self.head = Some(i),
        }
        self.tail = Some(i);
        self.n += 1;
        Ok(())
    }

    /// 先頭の要素を削除し、その所有権を返す
    pub fn pop_front(&mut self) -> Option<T> {
        let i = self.head?;
        let node = &mut self.nodes[i];
        let x = node.x.take();
        self.head = node.next.take();
        self.n -= 1;

        if self.n == 0 {
            // 空になったら配列ごと捨てて添字を振り直す
            self.tail = None;
            self.nodes.clear();
            self.free.clear();
        } else {
            self.free.push(i);
        }
        x
    }

    /// 先頭を指すカーソルを返す。空の場合は終端を指す
    pub fn begin(&self) -> Cursor<'_, T> {
        Cursor {
            list: self,
            at: self.head,
        }
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            cursor: self.begin(),
        }
    }

    /// predを満たす最初の要素を先頭から探し、可変参照を返す
    pub fn find_mut<P>(&mut self, mut pred: P) -> Option<&mut T>
    where
        P: FnMut(&T) -> bool,
    {
        let mut at = self.head;
        while let Some(i) = at {
            if self.nodes[i].x.as_ref().map_or(false, &mut pred) {
                return self.nodes[i].x.as_mut();
            }
            at = self.nodes[i].next;
        }
        None
    }

    /// 全ての要素を先頭から順にElement::destroyで破棄し、リスト自身も解放する
    pub fn destroy(self) {
        drop(self)
    }
}

impl<T: Element> Default for SLList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Element> Drop for SLList<T> {
    fn drop(&mut self) {
        while let Some(x) = self.pop_front() {
            x.destroy();
        }
    }
}

/// リスト全体の複製
///
/// 各要素を先頭から順にtry_cloneする。途中で失敗した場合、
/// 作りかけのリストはdropによって全要素が破棄される
impl<T: Element> Element for SLList<T> {
    fn try_clone(&self) -> Result<Self, CloneError> {
        let mut target = Self::new();
        for x in self.iter() {
            let y = x.try_clone()?;
            target.push_back(y).map_err(|e| {
                e.into_inner().destroy();
                CloneError
            })?;
        }
        Ok(target)
    }
}

impl<T: Element> Queue<T> for SLList<T> {
    type Error = AllocError<T>;

    fn add(&mut self, x: T) -> Result<(), AllocError<T>> {
        self.push_back(x)
    }

    fn remove(&mut self) -> Option<T> {
        self.pop_front()
    }
}

impl<T: Element + Debug> Debug for SLList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "null");
        }
        write!(f, "head")?;
        for x in self.iter() {
            write!(f, " -> {:?}", x)?;
        }
        Ok(())
    }
}

/// リスト上の位置
///
/// atがNoneのとき終端を指す。カーソルはリストを借用しているため、
/// カーソルが生きている間はリストを変更できない
pub struct Cursor<'a, T: Element> {
    list: &'a SLList<T>,
    at: Option<usize>,
}

impl<'a, T: Element> Cursor<'a, T> {
    /// 一つ先へ進めたカーソルを返す。終端のカーソルを進めても終端のまま
    pub fn next(self) -> Self {
        let at = self.at.and_then(|i| self.list.nodes[i].next);
        Self {
            list: self.list,
            at,
        }
    }

    /// カーソルが指す要素を返す。終端ではNone
    pub fn get(&self) -> Option<&'a T> {
        self.at.and_then(|i| self.list.nodes[i].x.as_ref())
    }

    pub fn is_end(&self) -> bool {
        self.at.is_none()
    }
}

impl<'a, T: Element> Clone for Cursor<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T: Element> Copy for Cursor<'a, T> {}

pub struct Iter<'a, T: Element> {
    cursor: Cursor<'a, T>,
}

impl<'a, T: Element> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let x = self.cursor.get()?;
        self.cursor = self.cursor.next();
        Some(x)
    }
}

impl<'a, T: Element> IntoIterator for &'a SLList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use pretty_assertions::assert_eq;
    use std::{cell::RefCell, rc::Rc};

    /// 破棄された順番を記録する要素
    struct Tracked {
        id: u32,
        log: Rc<RefCell<Vec<u32>>>,
        fail_clone: bool,
    }

    impl Tracked {
        fn new(id: u32, log: &Rc<RefCell<Vec<u32>>>) -> Self {
            Self {
                id,
                log: Rc::clone(log),
                fail_clone: false,
            }
        }
    }

    impl Element for Tracked {
        fn try_clone(&self) -> Result<Self, CloneError> {
            if self.fail_clone {
                Err(CloneError)
            } else {
                Ok(Tracked::new(self.id, &self.log))
            }
        }

        fn destroy(self) {
            self.log.borrow_mut().push(self.id);
        }
    }

    #[test]
    fn test_push_back() {
        let mut list = SLList::new();
        for x in "abcde".chars() {
            list.push_back(x).unwrap();
        }
        assert_eq!(list.size(), 5);
        assert_eq!(list.iter().collect::<String>(), "abcde");

        list.push_back('y').unwrap();
        assert_eq!(list.size(), 6);
        assert_eq!(list.iter().last(), Some(&'y'));
        println!("{:?}", list);
    }

    #[test]
    fn test_cursor() {
        let mut list = SLList::new();
        let end = list.begin();
        assert!(end.is_end());
        assert_eq!(end.get(), None);
        assert!(end.next().is_end());

        list.push_back(1).unwrap();
        list.push_back(2).unwrap();
        let c = list.begin();
        assert_eq!(c.get(), Some(&1));
        let c = c.next();
        assert_eq!(c.get(), Some(&2));
        let c = c.next();
        assert!(c.is_end());
        assert_eq!(c.get(), None);
        let c = c.next();
        assert!(c.is_end());
    }

    #[test]
    fn test_queue() {
        let mut list = SLList::new();
        for x in "abcde".chars() {
            list.add(x).unwrap();
        }
        assert_eq!(list.size(), 5);

        assert_eq!(list.remove(), Some('a'));
        assert_eq!(list.remove(), Some('b'));
        assert_eq!(list.size(), 3);

        // 削除した領域を再利用しても順番は変わらない
        list.add('x').unwrap();
        list.add('y').unwrap();
        assert_eq!(list.iter().collect::<String>(), "cdexy");

        while list.remove().is_some() {}
        assert!(list.is_empty());
        assert_eq!(list.remove(), None);

        list.add('z').unwrap();
        assert_eq!(list.iter().collect::<String>(), "z");
    }

    #[test]
    fn test_find_mut() {
        let mut list = SLList::new();
        for x in [1, 2, 3, 2] {
            list.push_back(x).unwrap();
        }
        if let Some(x) = list.find_mut(|x| *x == 2) {
            *x = 20;
        }
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 20, 3, 2]);
        assert!(list.find_mut(|x| *x == 4).is_none());
    }

    #[test]
    fn test_destroy_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut list = SLList::new();
        for id in 1..=4 {
            list.push_back(Tracked::new(id, &log)).unwrap();
        }
        list.destroy();
        assert_eq!(*log.borrow(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_try_clone() {
        let mut list = SLList::new();
        for x in ["a", "b", "c"] {
            list.push_back(x.to_string()).unwrap();
        }
        let mut copy = list.try_clone().unwrap();
        copy.push_back("d".to_string()).unwrap();

        assert_eq!(list.size(), 3);
        assert_eq!(copy.size(), 4);
        assert_eq!(format!("{:?}", list), r#"head -> "a" -> "b" -> "c""#);
        assert_eq!(
            format!("{:?}", copy),
            r#"head -> "a" -> "b" -> "c" -> "d""#
        );
    }

    #[test]
    fn test_try_clone_rollback() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut list = SLList::new();
        for id in 1..=3 {
            let mut x = Tracked::new(id, &log);
            x.fail_clone = id == 3;
            list.push_back(x).unwrap();
        }

        assert_eq!(list.try_clone().err(), Some(CloneError));
        // 作りかけの複製(1と2)だけが破棄される
        assert_eq!(*log.borrow(), vec![1, 2]);
        assert_eq!(list.size(), 3);

        drop(list);
        assert_eq!(*log.borrow(), vec![1, 2, 1, 2, 3]);
    }

    #[test]
    fn test_debug_empty() {
        let list: SLList<i32> = SLList::default();
        assert_eq!(format!("{:?}", list), "null");
    }

    #[test]
    fn test_alloc_error() {
        let e = AllocError(7);
        assert_eq!(e.to_string(), "AllocError: failed to grow list storage");
        assert_eq!(e.into_inner(), 7);
    }
}
