use crate::antibody::Antibody;
use crate::error::{AisError, AisResult};
use crate::families::{Day, Families, Family};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::debug;

/// One row of the family table as it appears on disk.
#[derive(Debug, Deserialize)]
struct FamilyRecord {
    family_id: usize,
    choice_0: Day,
    choice_1: Day,
    choice_2: Day,
    choice_3: Day,
    choice_4: Day,
    choice_5: Day,
    choice_6: Day,
    choice_7: Day,
    choice_8: Day,
    choice_9: Day,
    n_people: u32,
}

impl From<FamilyRecord> for Family {
    fn from(r: FamilyRecord) -> Self {
        Family {
            id: r.family_id,
            size: r.n_people,
            choices: [
                r.choice_0, r.choice_1, r.choice_2, r.choice_3, r.choice_4, r.choice_5,
                r.choice_6, r.choice_7, r.choice_8, r.choice_9,
            ],
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct AssignmentRecord {
    family_id: usize,
    assigned_day: Day,
}

pub fn load_families<P: AsRef<Path>>(path: P) -> AisResult<Families> {
    let file = File::open(path)?;
    load_families_from_reader(file)
}

pub fn load_families_from_reader<R: Read>(reader: R) -> AisResult<Families> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for result in rdr.deserialize::<FamilyRecord>() {
        rows.push(Family::from(result?));
    }

    if rows.is_empty() {
        return Err(AisError::Validation("family table has no rows".to_string()));
    }

    let families = Families::new(rows)?;
    debug!(
        "   -> Loaded {} families, {} people.",
        families.count(),
        families.total_people()
    );
    Ok(families)
}

/// Writes `family_id,assigned_day` rows for every family.
pub fn save_assignment<P: AsRef<Path>>(path: P, antibody: &Antibody) -> AisResult<()> {
    let file = File::create(path)?;
    write_assignment(file, antibody)
}

pub fn write_assignment<W: Write>(writer: W, antibody: &Antibody) -> AisResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for (family_id, &assigned_day) in antibody.days().iter().enumerate() {
        wtr.serialize(AssignmentRecord {
            family_id,
            assigned_day,
        })?;
    }
    wtr.flush()?;
    Ok(())
}

/// Reads an assignment written by [`save_assignment`] back into an antibody.
pub fn load_assignment<P: AsRef<Path>>(path: P, families: &Families) -> AisResult<Antibody> {
    let file = File::open(path)?;
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let mut days: Vec<Option<Day>> = vec![None; families.count()];
    for result in rdr.deserialize::<AssignmentRecord>() {
        let rec = result?;
        let slot = days.get_mut(rec.family_id).ok_or_else(|| {
            AisError::Validation(format!("unknown family id {}", rec.family_id))
        })?;
        if slot.replace(rec.assigned_day).is_some() {
            return Err(AisError::Validation(format!(
                "family {} assigned twice",
                rec.family_id
            )));
        }
    }

    let days = days
        .into_iter()
        .enumerate()
        .map(|(id, d)| {
            d.ok_or_else(|| AisError::Validation(format!("family {} has no assigned day", id)))
        })
        .collect::<AisResult<Vec<Day>>>()?;

    Antibody::from_days(days, families)
}
