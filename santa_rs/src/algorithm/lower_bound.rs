use super::cost_model::CostModel;
use super::definition::{Cost, Node, INFINITE_COST};

// 枝を完成させるのに必要な追加コストの下界
// 全単射の制約をゆるめて、残りの贈り主がそれぞれ最安の受け取り手を選べるものとして合計する。
// 複数の贈り主が同じ受け取り手を取り合ってもよいので、真の最適値を超えることはない。
pub struct LowerBoundEstimator<'a> {
    cost_model: &'a CostModel,

    // 贈り主を処理する順番
    order: &'a [usize],
}

impl<'a> LowerBoundEstimator<'a> {
    pub fn new(cost_model: &'a CostModel, order: &'a [usize]) -> Self {
        Self { cost_model, order }
    }

    pub fn estimate(&self, branch: &[Node]) -> Cost {
        let mut is_used = vec![false; self.cost_model.len()];
        for node in branch {
            is_used[node.receiver] = true;
        }

        let mut sum: Cost = 0;
        for giver in &self.order[branch.len()..] {
            // 有限コストの相手が残っていない贈り主がいたら完成不能
            let Some(min) = self
                .cost_model
                .cost_map(*giver)
                .iter_finite()
                .filter(|(receiver, _cost)| !is_used[*receiver])
                .map(|(_receiver, cost)| cost)
                .min()
            else {
                return INFINITE_COST;
            };

            sum = sum.saturating_add(min);
        }

        sum
    }
}
