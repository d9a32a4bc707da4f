use std::collections::HashMap;

use itertools::Itertools;

use super::definition::{Cost, Node};
use super::traverse::ITraverseContext;

// 浅い枝ほど同じ受け取り手の集合に何度もたどり着く。深い枝はまばらなので覚えない
pub const DEFAULT_MEMO_DEPTH: usize = 4;

// 子の列挙結果を覚えておくデコレーター
// 残りの部分問題は「どの受け取り手がもう使われたか」だけで決まり、割り当てた順番にはよらない。
// キャッシュは 1 回の探索のあいだだけ使い、探索が終わったら捨てる。
pub struct MemoizeDecorator<T: ITraverseContext> {
    decorator: T,
    depth_limit: usize,

    // 使用済みの受け取り手（昇順） → 子の列挙結果
    cache: HashMap<Vec<usize>, Option<Vec<Node>>>,
}

impl<T: ITraverseContext> ITraverseContext for MemoizeDecorator<T> {
    fn depth(&self) -> usize {
        self.decorator.depth()
    }

    fn children(&mut self, branch: &[Node]) -> Option<Vec<Node>> {
        if self.depth_limit < branch.len() {
            return self.decorator.children(branch);
        }

        let key = Self::key(branch);
        if let Some(children) = self.cache.get(&key) {
            return children.clone();
        }

        let children = self.decorator.children(branch);
        self.cache.insert(key, children.clone());
        children
    }

    fn lower_bound(&self, branch: &[Node]) -> Cost {
        self.decorator.lower_bound(branch)
    }
}

impl<T: ITraverseContext> MemoizeDecorator<T> {
    pub fn new(decorator: T) -> Self {
        Self::with_depth_limit(decorator, DEFAULT_MEMO_DEPTH)
    }

    pub fn with_depth_limit(decorator: T, depth_limit: usize) -> Self {
        Self {
            decorator,
            depth_limit,
            cache: HashMap::default(),
        }
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    pub fn into_inner(self) -> T {
        self.decorator
    }

    // 順番によらないキー
    fn key(branch: &[Node]) -> Vec<usize> {
        branch.iter().map(|node| node.receiver).sorted().collect()
    }
}
