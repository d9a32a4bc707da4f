mod assigner;
mod cost_model;
mod definition;
pub mod detail;
mod lower_bound;
mod memoize_decorator;
mod solver;
mod traverse;

use std::collections::{HashMap, HashSet};

pub use assigner::{Assigner, Assignment, AssignmentOptions, SolverKind};
pub use cost_model::{CostMap, CostModel};
pub use definition::{
    Completion, Cost, Node, SearchResult, TraverseResult, TraverseStatistics, INFINITE_COST,
};
pub use lower_bound::LowerBoundEstimator;
pub use memoize_decorator::{MemoizeDecorator, DEFAULT_MEMO_DEPTH};
pub use solver::{BranchAndBoundSolver, HungarianSolver, ISolver};
pub use traverse::{traverse, traverse_with_callback, ITraverseContext};

use crate::{BlackLists, ConfigurationError};

// 1 回の割り当てに参加する人と制約
pub struct ExchangeInfo {
    participants: Vec<String>,
    black_lists: BlackLists,
}

impl ExchangeInfo {
    pub fn participants(&self) -> &[String] {
        &self.participants
    }

    pub fn black_lists(&self) -> &BlackLists {
        &self.black_lists
    }
}

// 参加者が省略されていたらグループのメンバーとブラックリストのキーから集める
pub(crate) fn create_exchange_info(
    options: &AssignmentOptions,
) -> Result<ExchangeInfo, ConfigurationError> {
    let participants: Vec<String> = match &options.participants {
        Some(participants) => participants.clone(),
        None => derive_participants(&options.exclusion_groups, &options.black_lists),
    };

    if participants.is_empty() {
        return Err(ConfigurationError::NoParticipants);
    }

    let mut name_set: HashSet<&str> = HashSet::default();
    for name in &participants {
        if !name_set.insert(name) {
            return Err(ConfigurationError::DuplicateParticipant(name.clone()));
        }
    }

    let black_lists = merge_black_lists(&options.exclusion_groups, &options.black_lists);

    Ok(ExchangeInfo {
        participants,
        black_lists,
    })
}

// グループのメンバー、ブラックリストのキーの順に重複なく並べる
pub fn derive_participants(
    exclusion_groups: &[Vec<String>],
    black_lists: &HashMap<String, Vec<String>>,
) -> Vec<String> {
    let mut name_set: HashSet<&str> = HashSet::default();
    let mut participants = Vec::default();

    // HashMap のキーは順不同なのでソートしておく
    let mut keys: Vec<&String> = black_lists.keys().collect();
    keys.sort();

    for name in exclusion_groups.iter().flatten().chain(keys) {
        if !name_set.insert(name) {
            continue;
        }

        participants.push(name.to_string());
    }
    participants
}

// グループのメンバー同士は互いに贈れない
pub fn merge_black_lists(
    exclusion_groups: &[Vec<String>],
    black_lists: &HashMap<String, Vec<String>>,
) -> BlackLists {
    let mut result = BlackLists::default();

    for (giver, receivers) in black_lists {
        result
            .entry(giver.clone())
            .or_default()
            .extend(receivers.iter().cloned());
    }

    for group in exclusion_groups {
        for giver in group {
            let black_list = result.entry(giver.clone()).or_default();
            for receiver in group {
                if receiver == giver {
                    continue;
                }

                black_list.insert(receiver.clone());
            }
        }
    }

    result
}
