//! Terminal rendering for the wizard.
//!
//! Pure string rendering; the binary owns the actual input/output loop.
//! Screen content mirrors the product's result page: decision banner,
//! probability cards, feature impact table, recommendations, and what-if
//! scenarios.

use std::fmt::Write as _;

use crate::domain::report::{PriorityEmphasis, ResultReport};
use crate::domain::wizard::WizardStep;

/// Describes one input field on a wizard step.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Wire field name, as accepted by `update_field`.
    pub name: &'static str,
    /// Prompt label.
    pub label: &'static str,
    /// Allowed values or format hint.
    pub hint: &'static str,
}

/// The input fields belonging to a wizard step, in display order.
pub fn fields_for(step: WizardStep) -> &'static [FieldSpec] {
    match step {
        WizardStep::PersonalInfo => &[
            FieldSpec { name: "Gender", label: "Gender", hint: "Male / Female" },
            FieldSpec { name: "Married", label: "Marital Status", hint: "Yes (married) / No (single)" },
            FieldSpec { name: "Dependents", label: "Number of Dependents", hint: "0 / 1 / 2 / 3+" },
            FieldSpec { name: "Education", label: "Education", hint: "Graduate / Not Graduate" },
        ],
        WizardStep::Employment => &[
            FieldSpec { name: "Self_Employed", label: "Self Employed", hint: "Yes / No" },
            FieldSpec { name: "ApplicantIncome", label: "Applicant Income (monthly)", hint: "e.g. 5000" },
            FieldSpec { name: "CoapplicantIncome", label: "Coapplicant Income (monthly)", hint: "e.g. 2000 (0 if none)" },
        ],
        WizardStep::LoanDetails => &[
            FieldSpec { name: "LoanAmount", label: "Loan Amount (in thousands)", hint: "e.g. 150" },
            FieldSpec { name: "Loan_Amount_Term", label: "Loan Term (months)", hint: "12/36/60/84/120/180/240/300/360/480" },
        ],
        WizardStep::CreditProperty => &[
            FieldSpec { name: "Credit_History", label: "Credit History", hint: "1 (good) / 0 (bad)" },
            FieldSpec { name: "Property_Area", label: "Property Area", hint: "Urban / Semiurban / Rural" },
        ],
    }
}

/// Step header with a four-segment progress bar, e.g.
/// `Step 2 of 4 - Employment & Income  [##--]`.
pub fn progress_line(step: WizardStep) -> String {
    let filled = step.number() as usize;
    let total = WizardStep::ALL.len();
    let bar: String = (1..=total).map(|i| if i <= filled { '#' } else { '-' }).collect();
    format!("Step {} of {} - {}  [{}]", step.number(), total, step.title(), bar)
}

/// Renders the full result view as a multi-line string.
pub fn render_report(report: &ResultReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "==================================================");
    let _ = writeln!(out, "  {}", report.banner.headline);
    let _ = writeln!(out, "  {}", report.banner.subtitle);
    let _ = writeln!(out, "  Application ID: {}", report.application_id);
    let _ = writeln!(out, "==================================================");
    let _ = writeln!(out);

    for card in [
        &report.probabilities.approval,
        &report.probabilities.rejection,
        &report.probabilities.confidence,
    ] {
        let _ = writeln!(out, "  {:<22} {:>7}  ({})", card.label, card.display, card.caption);
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Feature Impact Analysis");
    let _ = writeln!(out, "-----------------------");
    for row in &report.impacts {
        let _ = writeln!(
            out,
            "  {:<22} {:<10} {} {:<7} {}",
            row.feature,
            row.value_display,
            row.badge.glyph(),
            row.magnitude_display,
            row.description
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "{}", report.recommendations.heading);
    let _ = writeln!(out, "{}", "-".repeat(report.recommendations.heading.len()));
    for card in &report.recommendations.cards {
        let marker = match card.emphasis {
            PriorityEmphasis::High => "[HIGH]  ",
            PriorityEmphasis::Medium => "[MEDIUM]",
            PriorityEmphasis::Low => "[LOW]   ",
        };
        let _ = writeln!(out, "  {} {} ({})", marker, card.message, card.category);
        let _ = writeln!(out, "           {}", card.action);
    }
    let _ = writeln!(out);

    if !report.scenarios.is_empty() {
        let _ = writeln!(out, "What-If Scenarios");
        let _ = writeln!(out, "-----------------");
        for scenario in &report.scenarios {
            let _ = writeln!(
                out,
                "  {}: {} -> {}  new probability {} ({})",
                scenario.label,
                scenario.current_display,
                scenario.target_display,
                scenario.probability_display,
                scenario.impact
            );
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{approved_fixture, rejected_fixture};
    use crate::domain::report::ResultReport;

    #[test]
    fn every_step_exposes_its_wire_fields() {
        let all_fields: Vec<&str> = WizardStep::ALL
            .iter()
            .flat_map(|step| fields_for(*step).iter().map(|f| f.name))
            .collect();

        assert_eq!(
            all_fields,
            vec![
                "Gender",
                "Married",
                "Dependents",
                "Education",
                "Self_Employed",
                "ApplicantIncome",
                "CoapplicantIncome",
                "LoanAmount",
                "Loan_Amount_Term",
                "Credit_History",
                "Property_Area",
            ]
        );
    }

    #[test]
    fn progress_line_fills_one_segment_per_step() {
        assert_eq!(
            progress_line(WizardStep::PersonalInfo),
            "Step 1 of 4 - Personal Information  [#---]"
        );
        assert_eq!(
            progress_line(WizardStep::CreditProperty),
            "Step 4 of 4 - Credit & Property  [####]"
        );
    }

    #[test]
    fn rendered_report_contains_every_section() {
        let report = ResultReport::from_response(&approved_fixture());
        let screen = render_report(&report);

        assert!(screen.contains("LOAN APPROVED"));
        assert!(screen.contains("Application ID: LP042917"));
        assert!(screen.contains("Approval Probability"));
        assert!(screen.contains("71.4%"));
        assert!(screen.contains("Feature Impact Analysis"));
        assert!(screen.contains("Ways to Maintain/Improve"));
        assert!(screen.contains("increase coapplicant income"));
    }

    #[test]
    fn rejected_report_uses_the_action_items_heading() {
        let report = ResultReport::from_response(&rejected_fixture());
        let screen = render_report(&report);

        assert!(screen.contains("LOAN REJECTED"));
        assert!(screen.contains("Priority Action Items"));
        assert!(screen.contains("[HIGH]"));
        assert!(screen.contains("improve credit history"));
    }
}
