use std::collections::HashMap;
use std::hash::Hash;

struct Link<T> {
    prev: Option<T>,
    next: Option<T>,
}

/// 대기 중인 플레이어의 FIFO.
/// 각 원소의 이웃을 인덱스로 들고 있어서 중간 원소 제거도 O(1) 입니다.
pub struct Queue<T: Eq + Hash + Clone> {
    head: Option<T>,
    tail: Option<T>,
    links: HashMap<T, Link<T>>,
}

impl<T: Eq + Hash + Clone> Default for Queue<T> {
    fn default() -> Self {
        Self {
            head: None,
            tail: None,
            links: HashMap::new(),
        }
    }
}

impl<T: Eq + Hash + Clone> Queue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn contains(&self, item: &T) -> bool {
        self.links.contains_key(item)
    }

    /// 이미 들어있으면 false 를 반환하고 순서를 바꾸지 않습니다.
    pub fn push(&mut self, item: T) -> bool {
        if self.links.contains_key(&item) {
            return false;
        }

        match &self.tail {
            Some(tail) => {
                if let Some(link) = self.links.get_mut(tail) {
                    link.next = Some(item.clone());
                }
            }
            None => self.head = Some(item.clone()),
        }

        let link = Link {
            prev: self.tail.replace(item.clone()),
            next: None,
        };
        self.links.insert(item, link);
        true
    }

    pub fn pop(&mut self) -> Option<T> {
        let head = self.head.clone()?;
        self.remove(&head);
        Some(head)
    }

    pub fn remove(&mut self, item: &T) -> bool {
        let Some(link) = self.links.remove(item) else {
            return false;
        };

        match &link.prev {
            Some(prev) => {
                if let Some(prev_link) = self.links.get_mut(prev) {
                    prev_link.next = link.next.clone();
                }
            }
            None => self.head = link.next.clone(),
        }

        match &link.next {
            Some(next) => {
                if let Some(next_link) = self.links.get_mut(next) {
                    next_link.prev = link.prev;
                }
            }
            None => self.tail = link.prev,
        }

        true
    }

    /// 앞에서부터 순회
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        let mut cursor = self.head.as_ref();
        std::iter::from_fn(move || {
            let current = cursor?;
            cursor = self.links.get(current).and_then(|l| l.next.as_ref());
            Some(current)
        })
    }
}
