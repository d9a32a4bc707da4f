pub mod config;
pub mod data_type;
pub mod history;
pub mod logger;

use std::collections::HashMap;

// ex. --group a/b/c
pub fn parse_groups<T, U>(iterator: T) -> Vec<Vec<String>>
where
    T: IntoIterator<Item = U>,
    U: AsRef<str>,
{
    iterator
        .into_iter()
        .map(|x| {
            x.as_ref()
                .split('/')
                .filter(|x| !x.is_empty())
                .map(|x| x.to_string())
                .collect::<Vec<String>>()
        })
        .filter(|x| !x.is_empty())
        .collect()
}

// ex. --blacklist giver/receiver0/receiver1
// 同じ贈り主が何度出てきても足し合わせる
pub fn parse_black_lists<T, U>(iterator: T) -> HashMap<String, Vec<String>>
where
    T: IntoIterator<Item = U>,
    U: AsRef<str>,
{
    let mut black_lists: HashMap<String, Vec<String>> = HashMap::default();
    for x in iterator {
        let mut inputs = x.as_ref().split('/').filter(|x| !x.is_empty());
        let Some(giver) = inputs.next() else {
            continue;
        };

        black_lists
            .entry(giver.to_string())
            .or_default()
            .extend(inputs.map(|x| x.to_string()));
    }
    black_lists
}
