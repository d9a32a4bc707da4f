use crate::{BlackLists, CostModifiers, HistoryRecord};

use super::definition::Cost;

/// ひとりの贈り主から見た、受け取り手ごとのコスト
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostMap {
    costs: Vec<Cost>,
    forbidden: Cost,
}

impl CostMap {
    pub fn cost(&self, receiver: usize) -> Cost {
        self.costs[receiver]
    }

    pub fn is_forbidden(&self, receiver: usize) -> bool {
        self.forbidden <= self.costs[receiver]
    }

    /// 禁止されていない受け取り手とそのコスト
    pub fn iter_finite(&self) -> impl Iterator<Item = (usize, Cost)> + '_ {
        self.costs
            .iter()
            .enumerate()
            .filter(|(_receiver, cost)| **cost < self.forbidden)
            .map(|(receiver, cost)| (receiver, *cost))
    }

    pub fn len(&self) -> usize {
        self.costs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }
}

/// 1 回の実行で使うコスト表。構築後は変更しない
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostModel {
    cost_maps: Vec<CostMap>,

    // 有限コストの総和より真に大きい値
    forbidden: Cost,
}

impl CostModel {
    // participants: 参加者一覧（インデックスがそのまま贈り主・受け取り手の番号になる）
    pub fn build(
        participants: &[String],
        history: &[HistoryRecord],
        black_lists: &BlackLists,
        modifiers: &CostModifiers,
    ) -> Self {
        let matrix: Vec<Vec<Option<Cost>>> = participants
            .iter()
            .map(|giver| {
                let black_list = black_lists.get(giver);
                let modifier = modifiers.get(giver);
                participants
                    .iter()
                    .map(|receiver| {
                        // 自分自身とブラックリストは禁止
                        if receiver == giver {
                            return None;
                        }
                        if black_list.is_some_and(|x| x.contains(receiver)) {
                            return None;
                        }

                        // 過去に同じ組み合わせになった回数
                        let count = history
                            .iter()
                            .filter(|record| record.is_assigned(giver, receiver))
                            .count() as Cost;
                        let extra = modifier
                            .and_then(|x| x.get(receiver))
                            .copied()
                            .unwrap_or(0);
                        Some(count.saturating_add(extra))
                    })
                    .collect()
            })
            .collect();

        Self::from_matrix(matrix)
    }

    /// None を禁止とした正方行列から構築します。
    pub fn from_matrix(matrix: Vec<Vec<Option<Cost>>>) -> Self {
        // 番兵はどんな割り当ての合計コストよりも大きくする
        let forbidden = matrix
            .iter()
            .flatten()
            .flatten()
            .fold(0 as Cost, |sum, cost| sum.saturating_add(*cost))
            .saturating_add(1);

        let cost_maps = matrix
            .into_iter()
            .map(|row| CostMap {
                costs: row.into_iter().map(|x| x.unwrap_or(forbidden)).collect(),
                forbidden,
            })
            .collect();

        Self {
            cost_maps,
            forbidden,
        }
    }

    pub fn len(&self) -> usize {
        self.cost_maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cost_maps.is_empty()
    }

    pub fn cost_map(&self, giver: usize) -> &CostMap {
        &self.cost_maps[giver]
    }

    pub fn cost(&self, giver: usize, receiver: usize) -> Cost {
        self.cost_maps[giver].cost(receiver)
    }

    pub fn is_forbidden(&self, giver: usize, receiver: usize) -> bool {
        self.cost_maps[giver].is_forbidden(receiver)
    }

    /// 禁止を表す番兵の値
    pub fn forbidden_cost(&self) -> Cost {
        self.forbidden
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};

    use crate::{BlackLists, CostModifiers, HistoryRecord};

    use super::CostModel;

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|x| x.to_string()).collect()
    }

    fn matrix(model: &CostModel) -> Vec<Vec<Option<u64>>> {
        (0..model.len())
            .map(|giver| {
                (0..model.len())
                    .map(|receiver| {
                        if model.is_forbidden(giver, receiver) {
                            None
                        } else {
                            Some(model.cost(giver, receiver))
                        }
                    })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn empty() {
        let model = CostModel::build(&[], &[], &BlackLists::default(), &CostModifiers::default());
        assert!(model.is_empty());
        assert_eq!(model.forbidden_cost(), 1);
    }

    #[test]
    fn simple() {
        let participants = names(&["jo", "anna", "bob"]);
        let model = CostModel::build(
            &participants,
            &[],
            &BlackLists::default(),
            &Default::default(),
        );

        assert_eq!(
            matrix(&model),
            vec![
                vec![None, Some(0), Some(0)],
                vec![Some(0), None, Some(0)],
                vec![Some(0), Some(0), None],
            ]
        );
    }

    #[test]
    fn history_and_black_lists() {
        let participants = names(&["jo", "anna", "bob", "jack"]);
        let history = vec![
            HistoryRecord::from_pairs([
                ("jo", "anna"),
                ("bob", "jack"),
                ("jack", "rob"),
                ("rob", "bob"),
            ]),
            HistoryRecord::from_pairs([("jo", "anna"), ("bob", "anna"), ("anna", "jack")]),
        ];
        let black_lists: BlackLists = HashMap::from([
            ("jo".to_string(), HashSet::from(["jack".to_string()])),
            (
                "bob".to_string(),
                HashSet::from(["jo".to_string(), "anna".to_string()]),
            ),
        ]);
        let model = CostModel::build(
            &participants,
            &history,
            &black_lists,
            &Default::default(),
        );

        assert_eq!(
            matrix(&model),
            vec![
                vec![None, Some(2), Some(0), None],
                vec![Some(0), None, Some(0), Some(1)],
                vec![None, None, None, Some(1)],
                vec![Some(0), Some(0), Some(0), None],
            ]
        );

        // 番兵は有限コストの総和より大きい
        assert_eq!(model.forbidden_cost(), 5);
    }

    #[test]
    fn modifiers() {
        let participants = names(&["jo", "anna", "bob"]);
        let modifiers: CostModifiers = HashMap::from([(
            "jo".to_string(),
            HashMap::from([("bob".to_string(), 3), ("jo".to_string(), 7)]),
        )]);
        let model = CostModel::build(&participants, &[], &BlackLists::default(), &modifiers);

        assert_eq!(model.cost(0, 2), 3);
        assert_eq!(model.cost(0, 1), 0);
        // 禁止された組み合わせには加算されない
        assert!(model.is_forbidden(0, 0));
        assert_eq!(model.forbidden_cost(), 4);
    }

    #[test]
    fn iter_finite() {
        let model = CostModel::from_matrix(vec![
            vec![None, Some(2), Some(0)],
            vec![Some(1), None, None],
            vec![None, None, None],
        ]);

        itertools::assert_equal(model.cost_map(0).iter_finite(), vec![(1, 2), (2, 0)]);
        itertools::assert_equal(model.cost_map(1).iter_finite(), vec![(0, 1)]);
        assert_eq!(model.cost_map(2).iter_finite().count(), 0);
    }
}
