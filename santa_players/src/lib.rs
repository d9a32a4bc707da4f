pub mod clients;
mod roster;

pub use roster::Roster;

// CSV の 1 行
// name,property_name,value
#[derive(Debug, serde::Deserialize)]
pub struct Record {
    name: String,
    property_name: String,
    value: String,
}

pub fn deserialize(str: &str) -> Result<Roster, csv::Error> {
    let mut rdr = csv::Reader::from_reader(str.as_bytes());
    let mut roster = Roster::default();
    for record in rdr.deserialize::<Record>() {
        let record = record?;
        roster.add_participant(&record.name);

        match &record.property_name as &str {
            "group" => roster.add_group_member(&record.value, &record.name),
            "blacklist" => roster.add_black_list(&record.name, &record.value),
            "" => {}
            other => log::debug!("Ignored property \"{other}\" of {}", record.name),
        }
    }

    log::info!(
        "Loaded {} participants and {} groups",
        roster.participants().len(),
        roster.groups().count()
    );
    Ok(roster)
}
