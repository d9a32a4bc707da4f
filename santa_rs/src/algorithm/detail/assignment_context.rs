use crate::algorithm::cost_model::CostModel;
use crate::algorithm::definition::{Cost, Node};
use crate::algorithm::lower_bound::LowerBoundEstimator;
use crate::algorithm::traverse::ITraverseContext;

// コスト表を樹形図として見せる文脈
// 深さ d の子は「order[d] 番目の贈り主が、まだ誰にも選ばれていない受け取り手に贈る」
pub struct AssignmentContext<'a> {
    cost_model: &'a CostModel,
    order: &'a [usize],
    estimator: LowerBoundEstimator<'a>,
}

impl<'a> AssignmentContext<'a> {
    pub fn new(cost_model: &'a CostModel, order: &'a [usize]) -> Self {
        Self {
            cost_model,
            order,
            estimator: LowerBoundEstimator::new(cost_model, order),
        }
    }
}

impl ITraverseContext for AssignmentContext<'_> {
    fn depth(&self) -> usize {
        self.order.len()
    }

    fn children(&mut self, branch: &[Node]) -> Option<Vec<Node>> {
        let giver = self.order[branch.len()];
        let children: Vec<Node> = self
            .cost_model
            .cost_map(giver)
            .iter_finite()
            .filter(|(receiver, _cost)| branch.iter().all(|node| node.receiver != *receiver))
            .map(|(receiver, cost)| Node::new(giver, receiver, cost))
            .collect();

        // 贈れる相手が残っていない
        if children.is_empty() {
            return None;
        }

        Some(children)
    }

    fn lower_bound(&self, branch: &[Node]) -> Cost {
        self.estimator.estimate(branch)
    }
}

#[cfg(test)]
mod tests {
    use super::AssignmentContext;
    use crate::algorithm::cost_model::CostModel;
    use crate::algorithm::definition::Node;
    use crate::algorithm::traverse::ITraverseContext;

    #[test]
    fn children_follow_order() {
        let model = CostModel::from_matrix(vec![
            vec![None, Some(1), Some(0)],
            vec![Some(2), None, Some(0)],
            vec![Some(0), Some(0), None],
        ]);
        let order = [2, 0, 1];
        let mut context = AssignmentContext::new(&model, &order);

        assert_eq!(context.depth(), 3);
        assert_eq!(
            context.children(&[]).unwrap(),
            vec![Node::new(2, 0, 0), Node::new(2, 1, 0)]
        );

        // 2 → 1 のあとは 0 が贈れるのは 2 だけ
        assert_eq!(
            context.children(&[Node::new(2, 1, 0)]).unwrap(),
            vec![Node::new(0, 2, 0)]
        );
    }

    #[test]
    fn no_receiver_left() {
        let model = CostModel::from_matrix(vec![vec![None, Some(0)], vec![Some(0), None]]);
        let order = [0, 1];
        let mut context = AssignmentContext::new(&model, &order);

        // 0 → 1 と決まったあと 1 に残っているのは 0
        assert_eq!(
            context.children(&[Node::new(0, 1, 0)]).unwrap(),
            vec![Node::new(1, 0, 0)]
        );

        // 全員禁止
        let model = CostModel::from_matrix(vec![vec![None, None], vec![Some(0), None]]);
        let mut context = AssignmentContext::new(&model, &order);
        assert!(context.children(&[]).is_none());
    }
}
