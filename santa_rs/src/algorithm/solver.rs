use rand::{rngs::StdRng, RngCore};

use super::cost_model::CostModel;
use super::definition::{Cost, Node, SearchResult, TraverseStatistics};
use super::detail::{hungarian, AssignmentContext};
use super::memoize_decorator::{MemoizeDecorator, DEFAULT_MEMO_DEPTH};
use super::traverse::traverse;

// order: 贈り主を処理する順番
// 返す枝は order の順に並ぶ。None なら割り当て不能
pub trait ISolver {
    fn solve(&mut self, cost_model: &CostModel, order: &[usize]) -> Option<SearchResult>;
}

/// 分枝限定法
pub struct BranchAndBoundSolver {
    memo_depth: usize,
    rng: Option<StdRng>,
}

impl BranchAndBoundSolver {
    pub fn new() -> Self {
        Self {
            memo_depth: DEFAULT_MEMO_DEPTH,
            rng: None,
        }
    }

    pub fn with_memo_depth(mut self, memo_depth: usize) -> Self {
        self.memo_depth = memo_depth;
        self
    }

    // 同コストの候補の順番をランダムにする
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = Some(rng);
        self
    }
}

impl Default for BranchAndBoundSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ISolver for BranchAndBoundSolver {
    fn solve(&mut self, cost_model: &CostModel, order: &[usize]) -> Option<SearchResult> {
        let context = AssignmentContext::new(cost_model, order);
        let mut memoize = MemoizeDecorator::with_depth_limit(context, self.memo_depth);
        let rng = self.rng.as_mut().map(|rng| rng as &mut dyn RngCore);
        let result = traverse(&mut memoize, rng);

        log::debug!(
            "Branch and bound: {} ({} memoized sets)",
            result.statistics,
            memoize.cache_len()
        );
        SearchResult::from_traverse_result(result)
    }
}

/// ハンガリー法
/// 禁止は番兵のコストとして行列に入れる。番兵はどの実行可能解の合計よりも大きいので、
/// 最適解が禁止を含んでいたら実行可能解はない。
#[derive(Default)]
pub struct HungarianSolver;

impl HungarianSolver {
    pub fn new() -> Self {
        Self
    }
}

impl ISolver for HungarianSolver {
    fn solve(&mut self, cost_model: &CostModel, order: &[usize]) -> Option<SearchResult> {
        // 行も列も order で並べ替えておくと、同点の解の選ばれ方が order に従う
        let matrix: Vec<Vec<Cost>> = order
            .iter()
            .map(|giver| {
                order
                    .iter()
                    .map(|receiver| cost_model.cost(*giver, *receiver))
                    .collect()
            })
            .collect();
        let columns = hungarian::solve(&matrix);

        let mut branch = Vec::with_capacity(order.len());
        for (row, column) in columns.into_iter().enumerate() {
            let giver = order[row];
            let receiver = order[column];
            if cost_model.is_forbidden(giver, receiver) {
                log::debug!("Hungarian: optimum uses a forbidden pair");
                return None;
            }
            branch.push(Node::new(giver, receiver, cost_model.cost(giver, receiver)));
        }

        let total_cost = branch.iter().map(|node| node.cost).sum();
        Some(SearchResult {
            branch,
            total_cost,
            statistics: TraverseStatistics::default(),
        })
    }
}
