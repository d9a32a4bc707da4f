use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

pub mod algorithm;
pub mod error;

pub use error::{AssignmentError, ConfigurationError, InfeasibleAssignmentError};

// 参加者 → プレゼントを贈ってはいけない相手
pub type BlackLists = HashMap<String, HashSet<String>>;

// 贈り主 → 受け取り手 → 追加コスト
// 符号なしなので下界の許容性は崩れない
pub type CostModifiers = HashMap<String, HashMap<String, u64>>;

/// 過去の割り当てで記録された受け取り手
/// 1 人だけの記録と複数人の記録の両方を受け付ける
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Receivers {
    One(String),
    Many(Vec<String>),
}

impl Receivers {
    pub fn contains(&self, name: &str) -> bool {
        match self {
            Receivers::One(receiver) => receiver == name,
            Receivers::Many(receivers) => receivers.iter().any(|receiver| receiver == name),
        }
    }
}

/// 過去 1 回分の割り当て（贈り主 → 受け取り手）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryRecord {
    assignments: BTreeMap<String, Receivers>,
}

impl HistoryRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<T, U, V>(iterator: T) -> Self
    where
        T: IntoIterator<Item = (U, V)>,
        U: AsRef<str>,
        V: AsRef<str>,
    {
        let mut record = Self::new();
        for (giver, receiver) in iterator {
            record.insert(giver.as_ref(), receiver.as_ref());
        }
        record
    }

    // 同じ贈り主に 2 回目以降の挿入があったら受け取り手を追加していく
    pub fn insert(&mut self, giver: &str, receiver: &str) {
        let Some(receivers) = self.assignments.get_mut(giver) else {
            self.assignments
                .insert(giver.to_string(), Receivers::One(receiver.to_string()));
            return;
        };

        match receivers {
            Receivers::One(current) => {
                *receivers = Receivers::Many(vec![current.clone(), receiver.to_string()]);
            }
            Receivers::Many(current) => current.push(receiver.to_string()),
        }
    }

    pub fn is_assigned(&self, giver: &str, receiver: &str) -> bool {
        self.assignments
            .get(giver)
            .is_some_and(|receivers| receivers.contains(receiver))
    }

    pub fn receivers(&self, giver: &str) -> Option<&Receivers> {
        self.assignments.get(giver)
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}
