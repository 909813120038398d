//! Worksheet engine - role-based competency self-assessment
//!
//! Binds every catalog entry for a role to a mutable assessment record.
//! Mutating operations only touch in-memory state and mark the engine
//! dirty; `commit` persists the whole sheet afterwards and announces the
//! new progress percentage on the event bus. That ordering guarantees a
//! persisted payload always reflects a fully-applied state transition.

use thiserror::Error;

use crate::catalog::{self, Competency, GradeTier, Role};
use crate::core::events::{Event, EventBus};
use crate::core::store::{Store, StoreError, StoreKey};
use crate::entities::assessment::{Assessment, AssessmentSheet};

/// Errors from worksheet operations
#[derive(Debug, Error)]
pub enum WorksheetError {
    #[error("unknown competency '{id}'")]
    UnknownCompetency { id: String },

    #[error("level {level} is not valid for '{id}' (valid: {domain:?})")]
    InvalidLevel {
        id: String,
        level: u8,
        domain: &'static [u8],
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// One role's worksheet state
pub struct Worksheet {
    role: Role,
    sheet: AssessmentSheet,
    selected: Option<String>,
    initialized: bool,
    dirty: bool,
}

impl Worksheet {
    fn store_key(role: Role) -> StoreKey {
        match role {
            Role::Ic => StoreKey::IcAssessments,
            Role::Manager => StoreKey::ManagerAssessments,
        }
    }

    /// Load the worksheet for a role, bulk-initializing from the catalog
    /// on first run (or after a corrupt payload) and applying the schema
    /// migration to old payloads. Stored records whose competency id has
    /// left the catalog are kept on disk but skipped by every view.
    pub fn load(store: &Store, role: Role) -> Self {
        let mut sheet: AssessmentSheet = store
            .load(Self::store_key(role))
            .unwrap_or_default();

        let mut dirty = sheet.migrate();

        // Lazily add records for competencies the catalog gained
        for comp in catalog::all_competencies(role) {
            if !sheet.assessments.iter().any(|a| a.competency_id == comp.id) {
                let mut assessment = Assessment::new(comp.id);
                assessment.grade_expectation = catalog::expectation(sheet.grade, comp.id);
                sheet.assessments.push(assessment);
                dirty = true;
            }
        }

        // Expectations are derived truth; re-derive in case the table
        // moved since the sheet was written. Orphans keep their stored
        // value.
        let grade = sheet.grade;
        for assessment in &mut sheet.assessments {
            if catalog::competency(&assessment.competency_id).is_none() {
                continue;
            }
            let expected = catalog::expectation(grade, &assessment.competency_id);
            if assessment.grade_expectation != expected {
                assessment.grade_expectation = expected;
                dirty = true;
            }
        }

        Self {
            role,
            sheet,
            selected: None,
            initialized: true,
            dirty,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn grade(&self) -> GradeTier {
        self.sheet.grade
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Catalog entries paired with their assessments, in framework
    /// order, skipping orphaned stored records
    pub fn entries(&self) -> Vec<(&'static Competency, &Assessment)> {
        catalog::all_competencies(self.role)
            .into_iter()
            .filter_map(|comp| {
                self.sheet
                    .assessments
                    .iter()
                    .find(|a| a.competency_id == comp.id)
                    .map(|a| (comp, a))
            })
            .collect()
    }

    pub fn assessment(&self, id: &str) -> Option<&Assessment> {
        self.sheet.assessments.iter().find(|a| a.competency_id == id)
    }

    /// Find the record for `id`, creating one lazily on first interaction
    fn index_of_or_insert(&mut self, id: &str) -> usize {
        match self
            .sheet
            .assessments
            .iter()
            .position(|a| a.competency_id == id)
        {
            Some(index) => index,
            None => {
                self.sheet.assessments.push(Assessment::new(id));
                self.sheet.assessments.len() - 1
            }
        }
    }

    fn competency_for(&self, id: &str) -> Result<&'static Competency, WorksheetError> {
        catalog::all_competencies(self.role)
            .into_iter()
            .find(|c| c.id == id)
            .ok_or_else(|| WorksheetError::UnknownCompetency { id: id.to_string() })
    }

    /// Toggle the single expanded competency: selecting a new id moves
    /// the selection, selecting the current id collapses it
    pub fn select(&mut self, id: &str) -> Result<(), WorksheetError> {
        self.competency_for(id)?;
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        } else {
            self.selected = Some(id.to_string());
        }
        Ok(())
    }

    /// Record a self-assessment. Levels outside the competency's scale
    /// are rejected without touching any state.
    pub fn rate(&mut self, id: &str, level: u8) -> Result<(), WorksheetError> {
        let comp = self.competency_for(id)?;
        if !comp.assessment_type.contains(level) {
            return Err(WorksheetError::InvalidLevel {
                id: id.to_string(),
                level,
                domain: comp.assessment_type.domain(),
            });
        }

        let grade = self.sheet.grade;
        let index = self.index_of_or_insert(id);
        let assessment = &mut self.sheet.assessments[index];
        assessment.self_assessment = level;
        assessment.grade_expectation = catalog::expectation(grade, id);
        self.dirty = true;
        Ok(())
    }

    /// Free-text evidence write, keyed by level; accepted unconditionally
    pub fn set_evidence(
        &mut self,
        id: &str,
        level: u8,
        text: impl Into<String>,
    ) -> Result<(), WorksheetError> {
        self.competency_for(id)?;
        let index = self.index_of_or_insert(id);
        self.sheet.assessments[index]
            .level_demonstrated_by
            .insert(level, text.into());
        self.dirty = true;
        Ok(())
    }

    /// Re-derive every record's expectation for a newly selected grade.
    /// Guarded by the initialized flag so an early call cannot clobber
    /// freshly-loaded data with defaults.
    pub fn change_grade(&mut self, grade: GradeTier) {
        if !self.initialized {
            return;
        }
        self.sheet.grade = grade;
        for assessment in &mut self.sheet.assessments {
            assessment.grade_expectation = catalog::expectation(grade, &assessment.competency_id);
        }
        self.dirty = true;
    }

    /// Percentage of competencies rated above 0, rounded to nearest
    pub fn progress_percentage(&self) -> u8 {
        let entries = self.entries();
        if entries.is_empty() {
            return 0;
        }
        let rated = entries.iter().filter(|(_, a)| a.is_rated()).count();
        ((rated as f64 / entries.len() as f64) * 100.0).round() as u8
    }

    /// Persist the sheet if anything changed, then announce progress
    pub fn commit(&mut self, store: &Store, bus: &EventBus) -> Result<(), WorksheetError> {
        if !self.dirty {
            return Ok(());
        }
        store.save(Self::store_key(self.role), &self.sheet)?;
        self.dirty = false;
        bus.publish(Event::ProgressUpdated {
            role: self.role,
            percentage: self.progress_percentage(),
        });
        Ok(())
    }
}

/// Serialize the catalog x grade-expectation matrix as CSV: one row per
/// competency, one expectation column per grade tier, cells formatted
/// `"<Label> (<value>)"` using the competency's own scale labels.
pub fn export_csv(role: Role) -> Result<String, WorksheetError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header = vec![
        "Theme".to_string(),
        "Pillar".to_string(),
        "Competency".to_string(),
        "Description".to_string(),
    ];
    for grade in GradeTier::all() {
        header.push(format!("GRADE {} EXPECTATION", grade.number()));
    }
    writer
        .write_record(&header)
        .map_err(csv_io_error)?;

    for comp in catalog::all_competencies(role) {
        let mut row = vec![
            comp.theme.as_str().to_string(),
            comp.pillar.to_string(),
            comp.name.to_string(),
            comp.description.to_string(),
        ];
        for grade in GradeTier::all() {
            let value = catalog::expectation(*grade, comp.id);
            row.push(format!("{} ({})", comp.assessment_type.label(value), value));
        }
        writer.write_record(&row).map_err(csv_io_error)?;
    }

    let bytes = writer.into_inner().map_err(|e| StoreError::Io {
        key: "csv",
        source: e.into_error(),
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn csv_io_error(e: csv::Error) -> WorksheetError {
    WorksheetError::Store(StoreError::Io {
        key: "csv",
        source: std::io::Error::other(e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::workspace::Workspace;
    use tempfile::tempdir;

    fn setup() -> (tempfile::TempDir, Store) {
        let tmp = tempdir().unwrap();
        let ws = Workspace::init(tmp.path()).unwrap();
        let store = Store::open(&ws).unwrap();
        (tmp, store)
    }

    #[test]
    fn test_first_load_initializes_from_catalog() {
        let (_tmp, store) = setup();
        let ws = Worksheet::load(&store, Role::Ic);
        assert_eq!(ws.entries().len(), 12);
        assert_eq!(ws.progress_percentage(), 0);
    }

    #[test]
    fn test_rate_validates_level_domain() {
        let (_tmp, store) = setup();
        let mut ws = Worksheet::load(&store, Role::Ic);

        // Proficiency competency: 1..5 valid, 6 rejected
        ws.rate("craft", 4).unwrap();
        assert!(matches!(
            ws.rate("craft", 6),
            Err(WorksheetError::InvalidLevel { level: 6, .. })
        ));
        // Rejection is a no-op
        assert_eq!(ws.assessment("craft").unwrap().self_assessment, 4);

        // Scope-impact competency: even levels only
        ws.rate("user-centered-design", 8).unwrap();
        assert!(ws.rate("user-centered-design", 3).is_err());
    }

    #[test]
    fn test_rate_is_idempotent() {
        let (_tmp, store) = setup();
        let bus = EventBus::new();
        let mut ws = Worksheet::load(&store, Role::Ic);
        ws.rate("delivery", 3).unwrap();
        ws.commit(&store, &bus).unwrap();
        let first: AssessmentSheet = store.load(StoreKey::IcAssessments).unwrap();

        let mut ws = Worksheet::load(&store, Role::Ic);
        ws.rate("delivery", 3).unwrap();
        ws.commit(&store, &bus).unwrap();
        let second: AssessmentSheet = store.load(StoreKey::IcAssessments).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_selection_is_exclusive_toggle() {
        let (_tmp, store) = setup();
        let mut ws = Worksheet::load(&store, Role::Ic);

        ws.select("craft").unwrap();
        assert_eq!(ws.selected(), Some("craft"));

        // Selecting another moves the selection, never two at once
        ws.select("delivery").unwrap();
        assert_eq!(ws.selected(), Some("delivery"));

        // Re-selecting collapses
        ws.select("delivery").unwrap();
        assert_eq!(ws.selected(), None);

        assert!(ws.select("no-such-id").is_err());
    }

    #[test]
    fn test_progress_percentage_bounds() {
        let (_tmp, store) = setup();
        let mut ws = Worksheet::load(&store, Role::Ic);
        assert_eq!(ws.progress_percentage(), 0);

        for comp in catalog::all_competencies(Role::Ic) {
            ws.rate(comp.id, comp.assessment_type.first_level()).unwrap();
        }
        assert_eq!(ws.progress_percentage(), 100);
    }

    #[test]
    fn test_progress_rounds_to_nearest() {
        let (_tmp, store) = setup();
        let mut ws = Worksheet::load(&store, Role::Ic);
        // 1 of 12 rated = 8.33% -> 8
        ws.rate("craft", 2).unwrap();
        assert_eq!(ws.progress_percentage(), 8);
        // 5 of 12 = 41.67% -> 42
        for id in ["delivery", "acumen", "methodology", "innovation"] {
            ws.rate(id, 1).unwrap();
        }
        assert_eq!(ws.progress_percentage(), 42);
    }

    #[test]
    fn test_change_grade_recomputes_expectations() {
        let (_tmp, store) = setup();
        let mut ws = Worksheet::load(&store, Role::Ic);

        ws.change_grade(GradeTier::G7);
        assert_eq!(
            ws.assessment("user-centered-design").unwrap().grade_expectation,
            6
        );

        ws.change_grade(GradeTier::G5);
        assert_eq!(ws.assessment("methodology").unwrap().grade_expectation, 1);
    }

    #[test]
    fn test_reload_round_trips_state() {
        let (_tmp, store) = setup();
        let bus = EventBus::new();

        let mut ws = Worksheet::load(&store, Role::Ic);
        ws.change_grade(GradeTier::G7);
        ws.rate("user-centered-design", 8).unwrap();
        ws.set_evidence("user-centered-design", 2, "Ran moderated studies for checkout")
            .unwrap();
        ws.commit(&store, &bus).unwrap();

        // Simulated reload
        let reloaded = Worksheet::load(&store, Role::Ic);
        let a = reloaded.assessment("user-centered-design").unwrap();
        assert_eq!(a.self_assessment, 8);
        assert_eq!(a.grade_expectation, 6);
        assert_eq!(
            a.level_demonstrated_by.get(&2).map(String::as_str),
            Some("Ran moderated studies for checkout")
        );
        assert_eq!(reloaded.grade(), GradeTier::G7);
    }

    #[test]
    fn test_commit_publishes_progress() {
        use std::cell::Cell;

        let (_tmp, store) = setup();
        let seen = Cell::new(0u8);
        let bus = EventBus::new();
        bus.subscribe(crate::core::events::Topic::ProgressUpdated, |event| {
            if let Event::ProgressUpdated { percentage, .. } = event {
                seen.set(*percentage);
            }
        });

        let mut ws = Worksheet::load(&store, Role::Ic);
        ws.rate("craft", 3).unwrap();
        ws.commit(&store, &bus).unwrap();
        assert_eq!(seen.get(), 8);
    }

    #[test]
    fn test_orphaned_records_are_skipped_not_fatal() {
        let (_tmp, store) = setup();
        let mut sheet = AssessmentSheet::default();
        sheet.assessments.push(Assessment::new("retired-competency"));
        store.save(StoreKey::IcAssessments, &sheet).unwrap();

        let ws = Worksheet::load(&store, Role::Ic);
        assert!(ws.entries().iter().all(|(c, _)| c.id != "retired-competency"));
        assert_eq!(ws.entries().len(), 12);
        assert_eq!(ws.progress_percentage(), 0);
    }

    #[test]
    fn test_export_csv_shape() {
        let csv_text = export_csv(Role::Ic).unwrap();
        let mut lines = csv_text.lines();

        let header = lines.next().unwrap();
        assert!(header.starts_with("Theme,Pillar,Competency,Description,GRADE 5 EXPECTATION"));
        assert!(header.ends_with("GRADE 11 EXPECTATION"));
        // 4 fixed columns + one per grade tier
        assert_eq!(header.split(',').count(), 4 + GradeTier::all().len());

        let rows: Vec<&str> = lines.collect();
        assert_eq!(rows.len(), 12);
        // Cell format "<Label> (<value>)"
        assert!(rows.iter().any(|r| r.contains("Foundational (1)")));
        assert!(rows.iter().any(|r| r.contains("Portfolio (6)")));
    }

    #[test]
    fn test_export_csv_manager_rows_mark_absent_expectations() {
        // Manager-track rows carry 0 below G8, rendered as N/A
        let csv_text = export_csv(Role::Manager).unwrap();
        assert!(csv_text.lines().count() == 1 + 15);
        assert!(csv_text.contains("N/A (0)"));
    }
}
