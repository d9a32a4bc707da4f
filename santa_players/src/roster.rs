use std::collections::HashMap;

use santa_rs::algorithm::{derive_participants, AssignmentOptions};

// 名簿ファイルから読み込んだ参加者と制約
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Roster {
    participants: Vec<String>,

    // グループ名 → メンバー（出てきた順）
    groups: Vec<(String, Vec<String>)>,

    black_lists: HashMap<String, Vec<String>>,
}

impl Roster {
    pub fn participants(&self) -> &[String] {
        &self.participants
    }

    pub fn groups(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.groups
            .iter()
            .map(|(name, members)| (name.as_str(), members.as_slice()))
    }

    pub fn black_list(&self, giver: &str) -> Option<&[String]> {
        let Some(black_list) = self.black_lists.get(giver) else {
            return None;
        };

        Some(black_list.as_slice())
    }

    pub fn add_participant(&mut self, name: &str) {
        if self.participants.iter().any(|x| x == name) {
            return;
        }

        self.participants.push(name.to_string());
    }

    pub fn add_group_member(&mut self, group: &str, name: &str) {
        let index = match self.groups.iter().position(|(x, _)| x == group) {
            Some(index) => index,
            None => {
                self.groups.push((group.to_string(), Vec::new()));
                self.groups.len() - 1
            }
        };

        let members = &mut self.groups[index].1;
        if !members.iter().any(|x| x == name) {
            members.push(name.to_string());
        }
    }

    pub fn add_black_list(&mut self, giver: &str, receiver: &str) {
        let black_list = self.black_lists.entry(giver.to_string()).or_default();
        if !black_list.iter().any(|x| x == receiver) {
            black_list.push(receiver.to_string());
        }
    }

    // 名簿の内容を割り当ての入力に足し込む
    // 参加者は既存の一覧の後ろに、重複しないように追加する
    // 一覧が省略されていたら、先にグループとブラックリストから集めた参加者を入れておく
    pub fn apply_to(&self, options: &mut AssignmentOptions) {
        if options.participants.is_none() {
            options.participants = Some(derive_participants(
                &options.exclusion_groups,
                &options.black_lists,
            ));
        }

        let participants = options.participants.get_or_insert_with(Vec::new);
        for name in &self.participants {
            if !participants.contains(name) {
                participants.push(name.clone());
            }
        }

        options
            .exclusion_groups
            .extend(self.groups.iter().map(|(_, members)| members.clone()));

        for (giver, receivers) in &self.black_lists {
            options
                .black_lists
                .entry(giver.clone())
                .or_default()
                .extend(receivers.iter().cloned());
        }
    }
}

#[cfg(test)]
mod tests {
    use santa_rs::algorithm::{Assigner, AssignmentOptions};

    use super::Roster;

    #[test]
    fn apply_to() {
        let mut roster = Roster::default();
        roster.add_participant("jo");
        roster.add_participant("anna");
        roster.add_participant("jo");
        roster.add_group_member("family", "jo");
        roster.add_group_member("family", "anna");
        roster.add_group_member("family", "anna");
        roster.add_black_list("anna", "bob");

        let mut options = AssignmentOptions {
            participants: Some(vec!["bob".to_string(), "jo".to_string()]),
            ..Default::default()
        };
        roster.apply_to(&mut options);

        assert_eq!(
            options.participants,
            Some(vec![
                "bob".to_string(),
                "jo".to_string(),
                "anna".to_string()
            ])
        );
        assert_eq!(
            options.exclusion_groups,
            vec![vec!["jo".to_string(), "anna".to_string()]]
        );
        assert_eq!(options.black_lists["anna"], vec!["bob".to_string()]);
    }

    #[test]
    fn apply_to_keeps_derived_participants() {
        // --group a/b と名簿 c, d を組み合わせる
        let mut roster = Roster::default();
        roster.add_participant("c");
        roster.add_participant("d");

        let mut options = AssignmentOptions {
            exclusion_groups: vec![vec!["a".to_string(), "b".to_string()]],
            ..Default::default()
        };
        roster.apply_to(&mut options);

        assert_eq!(
            options.participants,
            Some(vec![
                "a".to_string(),
                "b".to_string(),
                "c".to_string(),
                "d".to_string()
            ])
        );

        let assignment = Assigner::new().assign(&options).unwrap();
        assert_eq!(assignment.len(), 4);
        for name in ["a", "b", "c", "d"] {
            assert!(assignment.receiver(name).is_some());
        }
        assert_ne!(assignment.receiver("a"), Some("b"));
        assert_ne!(assignment.receiver("b"), Some("a"));
    }
}
