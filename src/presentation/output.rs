//! Output Rendering
//!
//! Renders invocation outcomes and errors as text or JSON lines.

use crate::application::ContractFunction;
use crate::config::OutputFormat;
use crate::domain::entities::LoanRecord;
use crate::error::LoanError;

/// Result of one successful contract invocation
#[derive(Debug, Clone)]
pub struct Outcome {
    pub function: ContractFunction,
    pub args: Vec<String>,
    pub payload: Vec<u8>,
}

impl Outcome {
    pub fn new(function: ContractFunction, args: Vec<String>, payload: Vec<u8>) -> Self {
        Self {
            function,
            args,
            payload,
        }
    }

    /// First argument is the loan id for every contract function
    pub fn loan_id(&self) -> &str {
        self.args.first().map(String::as_str).unwrap_or_default()
    }

    fn arg(&self, index: usize) -> &str {
        self.args.get(index).map(String::as_str).unwrap_or_default()
    }
}

/// Trait for rendering invocation results
pub trait OutcomeRenderer {
    fn render(&self, outcome: &Outcome) -> String;

    fn render_error(&self, error: &LoanError) -> String;
}

/// Human-readable renderer
pub struct TextRenderer;

impl OutcomeRenderer for TextRenderer {
    fn render(&self, outcome: &Outcome) -> String {
        let loan_id = outcome.loan_id();
        match outcome.function {
            ContractFunction::ApplyForLoan => format!(
                "✓ Loan '{}' opened for {} (principal {})",
                loan_id,
                outcome.arg(1),
                outcome.arg(2)
            ),
            ContractFunction::ApproveLoan => {
                format!("✓ Loan '{}' status set to {}", loan_id, outcome.arg(1))
            }
            ContractFunction::MakeRepayment => format!(
                "✓ Repayment of {} recorded for loan '{}'",
                outcome.arg(1),
                loan_id
            ),
            ContractFunction::CheckLoanBalance => {
                match LoanRecord::from_json(loan_id, &outcome.payload) {
                    Ok(record) => render_record(&record),
                    Err(_) => String::from_utf8_lossy(&outcome.payload).into_owned(),
                }
            }
        }
    }

    fn render_error(&self, error: &LoanError) -> String {
        format!("✗ Error [{}]: {}", error.code(), error)
    }
}

fn render_record(record: &LoanRecord) -> String {
    let repayments = if record.repayments().is_empty() {
        "none".to_string()
    } else {
        record
            .repayments()
            .iter()
            .map(f64::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    };

    let mut lines = vec![
        format!("Loan {}", record.loan_id()),
        format!("  Applicant:     {}", record.applicant_name()),
        format!("  Principal:     {}", record.principal()),
        format!("  Term:          {} months", record.term_months()),
        format!("  Interest rate: {}", record.interest_rate()),
        format!("  Status:        {}", record.status()),
        format!("  Outstanding:   {}", record.outstanding()),
        format!("  Repayments:    {}", repayments),
    ];
    if record.is_settled() {
        lines.push("  Settled".to_string());
    }
    lines.join("\n")
}

/// JSON renderer; one object per line
pub struct JsonRenderer;

impl OutcomeRenderer for JsonRenderer {
    fn render(&self, outcome: &Outcome) -> String {
        let mut json = serde_json::json!({
            "event": "ok",
            "function": outcome.function.name(),
            "loan_id": outcome.loan_id(),
        });

        if !outcome.payload.is_empty() {
            let loan = serde_json::from_slice::<serde_json::Value>(&outcome.payload)
                .unwrap_or_else(|_| {
                    serde_json::Value::String(String::from_utf8_lossy(&outcome.payload).into())
                });
            json["loan"] = loan;
        }

        json.to_string()
    }

    fn render_error(&self, error: &LoanError) -> String {
        serde_json::json!({
            "event": "error",
            "code": error.code(),
            "message": error.to_string(),
        })
        .to_string()
    }
}

/// Create a renderer based on format
pub fn create_renderer(format: OutputFormat) -> Box<dyn OutcomeRenderer> {
    match format {
        OutputFormat::Text => Box::new(TextRenderer),
        OutputFormat::Json => Box::new(JsonRenderer),
    }
}
