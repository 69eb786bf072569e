//! CLI Commands.
//!
//! Every command the operator CLI exposes: the dashboard metrics, the health
//! profile page, boundary validation, profile import and the effective
//! scoring parameters.

use std::path::PathBuf;

use super::output::Detail;
use super::{CliApp, CliError, CliResult, CommandOutput, Executable};
use crate::core::profile::{HealthProfile, UserId};
use crate::core::report::{MetricsReport, ProfileSummary};
use crate::storage::profiles::ProfileRepository;
use crate::utils::validation::profile_issues;

// ═══════════════════════════════════════════════════════════════════════════════
// COMMAND ENUM
// ═══════════════════════════════════════════════════════════════════════════════

/// All available commands
#[derive(Debug, Clone)]
pub enum Command {
    /// Dashboard metrics for a user
    Dashboard(DashboardCommand),
    /// Health profile page for a user
    Profile(ProfileCommand),
    /// Boundary validation of a stored profile
    Validate(ValidateCommand),
    /// Load profiles from a JSON file
    Import(ImportCommand),
    /// Effective scoring parameters
    Params(ParamsCommand),
}

fn to_data<T: serde::Serialize>(value: &T) -> CliResult<serde_json::Value> {
    serde_json::to_value(value).map_err(|e| CliError::Execution(e.to_string()))
}

// ═══════════════════════════════════════════════════════════════════════════════
// DASHBOARD COMMAND
// ═══════════════════════════════════════════════════════════════════════════════

/// Compute the dashboard metrics for a user
#[derive(Debug, Clone)]
pub struct DashboardCommand {
    /// Requesting user
    pub user: UserId,
}

impl Executable for DashboardCommand {
    fn execute(&self, app: &CliApp) -> CliResult<CommandOutput> {
        let profile = app.validated_store()?.get_profile(&self.user)?;
        let report = app.engine().evaluate(profile.as_ref(), app.today());

        let mut output = CommandOutput::success_with_data(
            format!("Dashboard for {}", self.user),
            to_data(&report)?,
        );
        for detail in report_details(&report) {
            output = output.with_detail(detail);
        }

        if report.needs_profile_setup() {
            output = output.with_warning("No health profile found; complete profile setup");
        }

        Ok(output)
    }
}

/// Text view of a metrics report
pub fn report_details(report: &MetricsReport) -> Vec<Detail> {
    vec![
        Detail::graded(
            "Health Score",
            format!(
                "{} ({})",
                report.health_score.display_value(),
                report.health_score.tag
            ),
            report.health_score.severity,
        ),
        Detail::graded(
            "BMI",
            format!("{} ({})", report.bmi.display_value(), report.bmi.tag),
            report.bmi.severity,
        ),
        Detail::field("Age", report.age_display()),
        Detail::field("As Of", report.computed_on.to_string()),
    ]
}

// ═══════════════════════════════════════════════════════════════════════════════
// PROFILE COMMAND
// ═══════════════════════════════════════════════════════════════════════════════

/// Show the health profile page for a user
#[derive(Debug, Clone)]
pub struct ProfileCommand {
    /// Requesting user
    pub user: UserId,
}

impl Executable for ProfileCommand {
    fn execute(&self, app: &CliApp) -> CliResult<CommandOutput> {
        let profile = app
            .validated_store()?
            .get_profile(&self.user)?
            .ok_or_else(|| CliError::NotFound(format!("No health profile for {}", self.user)))?;

        let summary = ProfileSummary::from_profile(&profile, app.engine(), app.today());

        let mut output = CommandOutput::success_with_data(
            format!("Health profile for {}", self.user),
            to_data(&summary)?,
        );
        for detail in summary_details(&summary) {
            output = output.with_detail(detail);
        }
        Ok(output)
    }
}

/// Text view of the health profile page
pub fn summary_details(summary: &ProfileSummary) -> Vec<Detail> {
    let mut details = vec![
        Detail::Section("Personal Information".into()),
        Detail::field("Height", summary.height.as_str()),
        Detail::field("Weight", summary.weight.as_str()),
        Detail::field("Age", summary.age.as_str()),
        Detail::field("Date of Birth", summary.date_of_birth.as_str()),
        Detail::field("Gender", summary.gender.as_str()),
        Detail::field("BMI", summary.bmi.as_str()),
        Detail::field("Blood Group", summary.blood_group.as_str()),
        Detail::field("Genotype", summary.genotype.as_str()),
    ];

    let sections = [
        ("Medical History", summary.history_lines()),
        ("Current Symptoms", summary.symptom_lines()),
        ("Medications", summary.medication_lines()),
    ];

    for (title, lines) in sections {
        details.push(Detail::Section(title.into()));
        details.extend(lines.into_iter().map(Detail::Item));
    }

    details
}

// ═══════════════════════════════════════════════════════════════════════════════
// VALIDATE COMMAND
// ═══════════════════════════════════════════════════════════════════════════════

/// Run boundary validation on a stored profile.
///
/// Reads the store directly and reports every issue, whatever the
/// configured validation mode.
#[derive(Debug, Clone)]
pub struct ValidateCommand {
    /// Requesting user
    pub user: UserId,
}

impl Executable for ValidateCommand {
    fn execute(&self, app: &CliApp) -> CliResult<CommandOutput> {
        let profile = app
            .open_store()?
            .get_profile(&self.user)?
            .ok_or_else(|| CliError::NotFound(format!("No health profile for {}", self.user)))?;

        let issues = profile_issues(&profile, app.today());
        let data = serde_json::json!({
            "userId": self.user,
            "valid": issues.is_empty(),
            "issues": issues
                .iter()
                .map(|e| serde_json::json!({ "code": e.code(), "message": e.to_string() }))
                .collect::<Vec<_>>(),
        });

        if issues.is_empty() {
            return Ok(CommandOutput::success_with_data(
                format!("Profile for {} is valid", self.user),
                data,
            ));
        }

        let mut output = CommandOutput::error(format!(
            "Profile for {} has {} validation issue(s)",
            self.user,
            issues.len()
        ));
        output.data = Some(data);
        for issue in &issues {
            output = output.with_warning(format!("[{}] {}", issue.code(), issue));
        }
        Ok(output)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// IMPORT COMMAND
// ═══════════════════════════════════════════════════════════════════════════════

/// Load a JSON array of profiles into the store
#[derive(Debug, Clone)]
pub struct ImportCommand {
    /// JSON file to read
    pub file: PathBuf,
}

impl Executable for ImportCommand {
    fn execute(&self, app: &CliApp) -> CliResult<CommandOutput> {
        let content = std::fs::read_to_string(&self.file)
            .map_err(|e| CliError::Io(format!("{}: {}", self.file.display(), e)))?;

        let profiles: Vec<HealthProfile> = serde_json::from_str(&content).map_err(|e| {
            CliError::InvalidArgument(format!("{} is not a profile array: {}", self.file.display(), e))
        })?;

        let store = app.open_store()?;
        let imported = store.import_profiles(profiles)?;
        let total = store.list_profiles()?.len();

        Ok(CommandOutput::success_with_data(
            format!("Imported {} profile(s)", imported),
            serde_json::json!({ "imported": imported, "total": total }),
        )
        .with_detail(Detail::field("Imported", imported.to_string()))
        .with_detail(Detail::field("Stored", total.to_string())))
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// PARAMS COMMAND
// ═══════════════════════════════════════════════════════════════════════════════

/// Show the effective scoring parameters
#[derive(Debug, Clone, Default)]
pub struct ParamsCommand;

impl Executable for ParamsCommand {
    fn execute(&self, app: &CliApp) -> CliResult<CommandOutput> {
        let params = app.engine().params();
        let data = to_data(params)?;

        let mut output = CommandOutput::success_with_data("Scoring parameters", data.clone());
        if let serde_json::Value::Object(map) = data {
            for (key, value) in map {
                output = output.with_detail(Detail::field(key, value.to_string()));
            }
        }
        Ok(output)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════════
