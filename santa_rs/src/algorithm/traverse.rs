use rand::{seq::SliceRandom, RngCore};

use super::definition::{
    Completion, Cost, Node, TraverseResult, TraverseStatistics, INFINITE_COST,
};

// 樹形図を走査するときに参照される問題側の情報
// children が None を返すとその枝は行き止まりとして扱われ、それ以下は走査しません。
// lower_bound は残りを埋めるのに必要な最小コストを過大評価してはいけません。
pub trait ITraverseContext {
    fn depth(&self) -> usize;

    fn children(&mut self, branch: &[Node]) -> Option<Vec<Node>>;

    fn lower_bound(&self, branch: &[Node]) -> Cost;
}

// 関数オブジェクトを利用するためのアダプター
// 下界は常に 0 (許容的)
struct TreeCallback<TFunc: FnMut(&[Node]) -> Option<Vec<Node>>> {
    depth: usize,
    func: TFunc,
}

impl<TFunc: FnMut(&[Node]) -> Option<Vec<Node>>> ITraverseContext for TreeCallback<TFunc> {
    fn depth(&self) -> usize {
        self.depth
    }

    fn children(&mut self, branch: &[Node]) -> Option<Vec<Node>> {
        (self.func)(branch)
    }

    fn lower_bound(&self, _branch: &[Node]) -> Cost {
        0
    }
}

// 関数オブジェクトで注入するパターン
pub fn traverse_with_callback<TFunc>(depth: usize, callback: TFunc) -> TraverseResult
where
    TFunc: FnMut(&[Node]) -> Option<Vec<Node>>,
{
    let mut tree_callback = TreeCallback {
        depth,
        func: callback,
    };
    traverse(&mut tree_callback, None)
}

// より詳細な実装を注入するパターン
// rng を渡すと同じコストの候補の順番がランダムになる
pub fn traverse<T>(context: &mut T, rng: Option<&mut dyn RngCore>) -> TraverseResult
where
    T: ITraverseContext,
{
    let mut rng = rng;
    let mut branch = Vec::with_capacity(context.depth());
    traverse_branch(context, &mut branch, INFINITE_COST, &mut rng)
}

// budget 以下のコストで branch を完成させる最良の枝を探す
fn traverse_branch<T>(
    context: &mut T,
    branch: &mut Vec<Node>,
    budget: Cost,
    rng: &mut Option<&mut dyn RngCore>,
) -> TraverseResult
where
    T: ITraverseContext,
{
    // 樹形図の末端まで到達していた
    if branch.len() == context.depth() {
        return TraverseResult::complete(branch.to_vec(), 0);
    }

    // 行き止まり
    let Some(mut children) = context.children(branch) else {
        return TraverseResult::infeasible();
    };

    // 残りの贈り主のだれかに相手がいなければ無条件で行き止まり
    let lower_bound = context.lower_bound(branch);
    if lower_bound == INFINITE_COST {
        return TraverseResult::infeasible();
    }

    // 同コストの候補をシャッフルしてから安定ソートすると同点の順番だけがランダムになる
    if let Some(rng) = rng.as_deref_mut() {
        children.shuffle(rng);
    }
    children.sort_by_key(|node| node.cost);

    let mut statistics = TraverseStatistics::default();
    let mut best: Option<Completion> = None;
    for child in children {
        let best_cost = best.as_ref().map_or(INFINITE_COST, |x| x.cost);

        // 現在の最良解より真に小さい解だけを探す
        let remaining = budget.min(best_cost.saturating_sub(1));
        if best_cost <= lower_bound || remaining < child.cost {
            statistics.trimmed += 1;
            continue;
        }

        branch.push(child);
        let sub = traverse_branch(context, branch, remaining - child.cost, rng);
        branch.pop();

        statistics.explored += 1;
        statistics.merge(&sub.statistics);

        let Some(completion) = sub.best else {
            // 枝刈りせずに調べ尽くして解がなかった
            if sub.statistics.trimmed == 0 {
                statistics.failed += 1;
            }
            continue;
        };

        let total = completion.cost.saturating_add(child.cost);
        if total < best_cost {
            best = Some(Completion {
                branch: completion.branch,
                cost: total,
            });
        }
    }

    TraverseResult { best, statistics }
}
