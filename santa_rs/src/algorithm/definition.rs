use std::fmt::Display;

pub type Cost = u64;

// 探索中の「無限大」
// 予算なし、最良解なし、完成不能な下界をこれで表す
pub const INFINITE_COST: Cost = Cost::MAX;

/// 樹形図のひとつの節。深さ d の節は「d 番目の贈り主が receiver に贈る」を表す
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Node {
    pub giver: usize,
    pub receiver: usize,
    pub cost: Cost,
}

impl Node {
    pub fn new(giver: usize, receiver: usize, cost: Cost) -> Self {
        Self {
            giver,
            receiver,
            cost,
        }
    }
}

/// 1 回の探索で集計される統計
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TraverseStatistics {
    // 再帰で立ち入った節の数
    pub explored: u64,

    // 枝刈りなしで調べ尽くして解がなかった部分木の数
    pub failed: u64,

    // 下界と予算で飛ばした候補の数
    pub trimmed: u64,
}

impl TraverseStatistics {
    pub fn merge(&mut self, other: &Self) {
        self.explored = self.explored.saturating_add(other.explored);
        self.failed = self.failed.saturating_add(other.failed);
        self.trimmed = self.trimmed.saturating_add(other.trimmed);
    }
}

impl Display for TraverseStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "explored: {}, failed: {}, trimmed: {}",
            self.explored, self.failed, self.trimmed
        )
    }
}

/// 根から葉までそろった枝と、その枝のうち呼び出し元より下の部分のコスト
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub branch: Vec<Node>,
    pub cost: Cost,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraverseResult {
    // None なら解なし
    pub best: Option<Completion>,
    pub statistics: TraverseStatistics,
}

impl TraverseResult {
    pub(crate) fn complete(branch: Vec<Node>, cost: Cost) -> Self {
        Self {
            best: Some(Completion { branch, cost }),
            statistics: TraverseStatistics::default(),
        }
    }

    pub(crate) fn infeasible() -> Self {
        Self {
            best: None,
            statistics: TraverseStatistics::default(),
        }
    }

    pub fn is_feasible(&self) -> bool {
        self.best.is_some()
    }
}

/// ソルバーが返す完全な割り当て
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub branch: Vec<Node>,
    pub total_cost: Cost,
    pub statistics: TraverseStatistics,
}

impl SearchResult {
    pub(crate) fn from_traverse_result(result: TraverseResult) -> Option<Self> {
        let Some(completion) = result.best else {
            return None;
        };

        Some(Self {
            branch: completion.branch,
            total_cost: completion.cost,
            statistics: result.statistics,
        })
    }
}
