use std::collections::HashMap;

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use serde::{ser::SerializeMap, Deserialize, Serialize};

use super::cost_model::CostModel;
use super::definition::{Cost, TraverseStatistics};
use super::memoize_decorator::DEFAULT_MEMO_DEPTH;
use super::solver::{BranchAndBoundSolver, HungarianSolver, ISolver};
use crate::{AssignmentError, CostModifiers, HistoryRecord, InfeasibleAssignmentError};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SolverKind {
    #[default]
    BranchAndBound,
    Hungarian,
}

/// 割り当ての入力。省略された項目は既定値になります。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AssignmentOptions {
    // None ならグループとブラックリストから集める
    pub participants: Option<Vec<String>>,
    pub history: Vec<HistoryRecord>,
    pub exclusion_groups: Vec<Vec<String>>,
    pub black_lists: HashMap<String, Vec<String>>,
    pub modifiers: CostModifiers,

    // 贈り主の処理順と同点の候補の順番をランダムにする
    pub randomize: bool,
    pub seed: Option<u64>,
    pub solver: SolverKind,
    pub memo_depth: usize,
}

impl Default for AssignmentOptions {
    fn default() -> Self {
        Self {
            participants: None,
            history: Vec::default(),
            exclusion_groups: Vec::default(),
            black_lists: HashMap::default(),
            modifiers: CostModifiers::default(),
            randomize: true,
            seed: None,
            solver: SolverKind::default(),
            memo_depth: DEFAULT_MEMO_DEPTH,
        }
    }
}

/// 割り当て結果。贈り主は元の参加者の順番に並ぶ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pairs: Vec<(String, String)>,
    total_cost: Cost,
    statistics: TraverseStatistics,
}

impl Assignment {
    pub fn receiver(&self, giver: &str) -> Option<&str> {
        let Some((_giver, receiver)) = self.pairs.iter().find(|(x, _)| x == giver) else {
            return None;
        };

        Some(receiver.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs
            .iter()
            .map(|(giver, receiver)| (giver.as_str(), receiver.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn total_cost(&self) -> Cost {
        self.total_cost
    }

    pub fn statistics(&self) -> &TraverseStatistics {
        &self.statistics
    }

    // 次回以降の履歴として保存する形
    pub fn to_history_record(&self) -> HistoryRecord {
        HistoryRecord::from_pairs(self.iter())
    }
}

// 参加者の順番を保ったオブジェクトとして書き出す
impl Serialize for Assignment {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.pairs.len()))?;
        for (giver, receiver) in &self.pairs {
            map.serialize_entry(giver, receiver)?;
        }
        map.end()
    }
}

#[derive(Default)]
pub struct Assigner;

impl Assigner {
    pub fn new() -> Self {
        Self
    }

    pub fn assign(&self, options: &AssignmentOptions) -> Result<Assignment, AssignmentError> {
        // 探索を始める前に設定を検証する
        let info = super::create_exchange_info(options)?;
        let participants = info.participants();
        let cost_model = CostModel::build(
            participants,
            &options.history,
            info.black_lists(),
            &options.modifiers,
        );

        // 贈り主を処理する順番
        let mut order: Vec<usize> = (0..participants.len()).collect();
        let mut solver: Box<dyn ISolver> = if options.randomize {
            let mut rng = match options.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            order.shuffle(&mut rng);
            Self::create_solver(options, Some(rng))
        } else {
            Self::create_solver(options, None)
        };

        log::debug!(
            "Assigning {} participants with {:?}",
            participants.len(),
            options.solver
        );
        let Some(result) = solver.solve(&cost_model, &order) else {
            return Err(InfeasibleAssignmentError {
                participant_count: participants.len(),
            }
            .into());
        };
        log::debug!("Total cost: {}, {}", result.total_cost, result.statistics);

        // 贈り主の番号 → 受け取り手の番号
        let mut receivers = vec![0; participants.len()];
        for node in &result.branch {
            receivers[node.giver] = node.receiver;
        }

        let pairs = receivers
            .iter()
            .enumerate()
            .map(|(giver, receiver)| {
                (
                    participants[giver].clone(),
                    participants[*receiver].clone(),
                )
            })
            .collect();

        Ok(Assignment {
            pairs,
            total_cost: result.total_cost,
            statistics: result.statistics,
        })
    }

    fn create_solver(options: &AssignmentOptions, rng: Option<StdRng>) -> Box<dyn ISolver> {
        match options.solver {
            SolverKind::BranchAndBound => {
                let solver = BranchAndBoundSolver::new().with_memo_depth(options.memo_depth);
                match rng {
                    Some(rng) => Box::new(solver.with_rng(rng)),
                    None => Box::new(solver),
                }
            }
            SolverKind::Hungarian => Box::new(HungarianSolver::new()),
        }
    }
}
