use crate::ParticipantId;
use crate::RoundLedger;
use crate::Settings;
use crate::SurveySubmission;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

/// Directory receiving the ledger dump and survey answers of one session.
///
/// - `data_<nodename>.json`: full ledger keyed by participant id, rewritten
///   on every dump
/// - `survey/<participant>.json`: survey answers, appended one JSON document
///   per submission
#[derive(Debug, Clone)]
pub struct Archive {
    root: PathBuf,
    nodename: String,
}

impl Archive {
    pub fn new<P: AsRef<Path>>(root: P, settings: &Settings) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            nodename: settings.nodename(),
        }
    }
    pub fn ledger_path(&self) -> PathBuf {
        self.root.join(format!("data_{}.json", self.nodename))
    }
    pub fn survey_path(&self, id: &str) -> PathBuf {
        let name = id.replace(['/', '\\', '.'], "_");
        self.root.join("survey").join(format!("{}.json", name))
    }

    pub fn write_ledger(&self, ledger: &RoundLedger) -> std::io::Result<PathBuf> {
        let path = self.ledger_path();
        std::fs::create_dir_all(&self.root)?;
        std::fs::write(&path, ledger.to_json())?;
        Ok(path)
    }
    pub fn append_survey(
        &self,
        id: &ParticipantId,
        survey: &SurveySubmission,
    ) -> std::io::Result<PathBuf> {
        let path = self.survey_path(id);
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(&survey.answers)?;
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)?;
        writeln!(file, "{}", json)?;
        Ok(path)
    }

    /// Non-fatal [`Archive::write_ledger`].
    pub fn dump(&self, ledger: &RoundLedger) {
        match self.write_ledger(ledger) {
            Ok(path) => log::info!("[archive] saved game data to {}", path.display()),
            Err(e) => log::warn!("[archive] could not save game data: {}", e),
        }
    }
    /// Non-fatal [`Archive::append_survey`].
    pub fn save_survey(&self, id: &ParticipantId, survey: &SurveySubmission) {
        match self.append_survey(id, survey) {
            Ok(path) => log::info!("[archive] saved survey of {} to {}", id, path.display()),
            Err(e) => log::warn!("[archive] could not save survey of {}: {}", id, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PayoffTable;
    use crate::ResponseEvent;
    use crate::Strategy;
    use crate::VisitEvent;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "hawkdove-{}-{}",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn ledger_dump_is_keyed_by_participant() {
        let dir = scratch("ledger");
        let archive = Archive::new(&dir, &Settings::default());
        let mut ledger = RoundLedger::new(PayoffTable::default(), 0.1);
        let visit = VisitEvent::new("a".into(), Strategy::Dove, 10, false);
        ledger.record_visit(1, "b", &visit).unwrap();
        ledger
            .record_response(&ResponseEvent::answer(&visit, "b".into(), Strategy::Dove, 5, 1, false))
            .unwrap();
        let path = archive.write_ledger(&ledger).unwrap();
        assert_eq!(path, dir.join("data_lgc1.json"));
        let json = serde_json::from_str::<serde_json::Value>(&std::fs::read_to_string(&path).unwrap())
            .unwrap();
        assert_eq!(json["a"]["totalEarnings"], 60);
        assert_eq!(json["b"]["totalEarnings"], 60);
        let _ = std::fs::remove_dir_all(&dir);
    }
    #[test]
    fn surveys_append() {
        let dir = scratch("survey");
        let archive = Archive::new(&dir, &Settings::default());
        let id = "p/1".to_string();
        for n in 0..2 {
            let survey = SurveySubmission {
                answers: serde_json::json!({ "n": n }),
            };
            archive.append_survey(&id, &survey).unwrap();
        }
        let text = std::fs::read_to_string(archive.survey_path(&id)).unwrap();
        assert!(archive.survey_path(&id).ends_with("survey/p_1.json"));
        assert_eq!(text.matches("\"n\"").count(), 2);
        let _ = std::fs::remove_dir_all(&dir);
    }
    #[test]
    fn write_failures_are_not_fatal() {
        let dir = scratch("blocked");
        std::fs::create_dir_all(dir.parent().unwrap()).unwrap();
        std::fs::write(&dir, "a file where the directory should be").unwrap();
        let archive = Archive::new(&dir, &Settings::default());
        let ledger = RoundLedger::new(PayoffTable::default(), 0.1);
        assert!(archive.write_ledger(&ledger).is_err());
        archive.dump(&ledger);
        let _ = std::fs::remove_file(&dir);
    }
}
