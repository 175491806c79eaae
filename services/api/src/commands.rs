use crate::infra::{parse_date, parse_dose, parse_schedule_type, parse_sex, resolve_schedule_type};
use chrono::NaiveDate;
use clap::Args;
use hpv_tracker::config::AppConfig;
use hpv_tracker::eligibility::{
    age, EligibilityDecision, EligibilityEngine, EligibilityError, Profile, ScreeningAnswers, Sex,
};
use hpv_tracker::error::AppError;
use hpv_tracker::program::ProgramConfig;
use hpv_tracker::schedule::{
    reminder_plan, DoseHistory, Reminder, ScheduleType, SeriesSnapshot, VaccineDose,
};
use hpv_tracker::triage::{classify, SymptomReport};

#[derive(Args, Debug, Default)]
pub(crate) struct EligibilityArgs {
    /// Age in whole years. Takes precedence over --date-of-birth.
    #[arg(long)]
    pub(crate) age: Option<u32>,
    /// Date of birth (YYYY-MM-DD), checked only when age is needed
    #[arg(long)]
    pub(crate) date_of_birth: Option<String>,
    /// female or male
    #[arg(long, value_parser = parse_sex)]
    pub(crate) sex: Option<Sex>,
    /// History of severe allergic reaction to a vaccine
    #[arg(long)]
    pub(crate) anaphylaxis: bool,
    /// Known yeast allergy
    #[arg(long)]
    pub(crate) yeast_allergy: bool,
    /// Currently very sick or running a fever
    #[arg(long)]
    pub(crate) fever: bool,
    #[arg(long)]
    pub(crate) immunocompromised: bool,
    /// Pregnancy answer (true|false). Leave out when the question was not asked.
    #[arg(long)]
    pub(crate) pregnant: Option<bool>,
    /// Evaluation date (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ScheduleArgs {
    /// Schedule type stored when the series started (two_dose|three_dose)
    #[arg(long, value_parser = parse_schedule_type)]
    pub(crate) schedule_type: Option<ScheduleType>,
    /// Age at the first dose, used when no schedule type is stored
    #[arg(long)]
    pub(crate) age_at_first_dose: Option<u32>,
    #[arg(long)]
    pub(crate) immunocompromised: bool,
    /// Recorded dose as N:YYYY-MM-DD. Repeat for each dose.
    #[arg(long = "dose", value_parser = parse_dose)]
    pub(crate) doses: Vec<VaccineDose>,
    #[arg(long)]
    pub(crate) eligibility_complete: bool,
    #[arg(long)]
    pub(crate) clinic_found: bool,
    /// Override the program's dose 1 to dose 2 interval for two-dose series
    #[arg(long)]
    pub(crate) months_after_dose1: Option<u32>,
    /// Name used in reminder copy
    #[arg(long, default_value = "Your child")]
    pub(crate) name: String,
    /// Reporting date (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct TriageArgs {
    #[arg(long)]
    pub(crate) genital_anal_bumps: bool,
    #[arg(long)]
    pub(crate) unusual_bleeding: bool,
    #[arg(long)]
    pub(crate) pain_during_sex: bool,
    #[arg(long)]
    pub(crate) pelvic_pain: bool,
    #[arg(long)]
    pub(crate) discharge_changes: bool,
}

fn load_program() -> Result<ProgramConfig, AppError> {
    Ok(AppConfig::load()?.program.program_config()?)
}

pub(crate) fn run_eligibility(args: EligibilityArgs) -> Result<(), AppError> {
    let engine = EligibilityEngine::new(load_program()?).map_err(EligibilityError::Config)?;
    let today = args.today.unwrap_or_else(age::today);
    let decision = evaluate(&engine, &args, today)?;
    render_eligibility(&decision, today);
    Ok(())
}

fn evaluate(
    engine: &EligibilityEngine,
    args: &EligibilityArgs,
    today: NaiveDate,
) -> Result<EligibilityDecision, EligibilityError> {
    let profile = Profile {
        date_of_birth: args.date_of_birth.clone(),
        age_years: args.age,
        sex: args.sex,
        ..Profile::default()
    };
    let screening = ScreeningAnswers {
        anaphylaxis: args.anaphylaxis,
        yeast_allergy: args.yeast_allergy,
        very_sick_fever: args.fever,
        immunocompromised: args.immunocompromised,
        pregnant: args.pregnant,
    };

    engine.evaluate(&profile, &screening, today)
}

fn render_eligibility(decision: &EligibilityDecision, today: NaiveDate) {
    println!("Eligibility screening (evaluated {today})");
    println!("- Status: {}", decision.status.label());
    println!("- Rule: {}", decision.rule);
    println!("- {}", decision.message());
    if decision.status.is_deferral() {
        println!("Screen again once the temporary condition has passed.");
    }
}

pub(crate) fn run_schedule(args: ScheduleArgs) -> Result<(), AppError> {
    let config = load_program()?;
    let (snapshot, reminders) = plan_schedule(args, &config)?;
    render_schedule(&snapshot, &reminders);
    Ok(())
}

fn plan_schedule(
    args: ScheduleArgs,
    config: &ProgramConfig,
) -> Result<(SeriesSnapshot, Vec<Reminder>), AppError> {
    let ScheduleArgs {
        schedule_type,
        age_at_first_dose,
        immunocompromised,
        doses,
        eligibility_complete,
        clinic_found,
        months_after_dose1,
        name,
        today,
    } = args;

    let schedule_type =
        resolve_schedule_type(schedule_type, age_at_first_dose, immunocompromised, config)?;
    let history = DoseHistory::new(doses)?;
    let months = months_after_dose1.unwrap_or(config.dose2_months_after_dose1);
    let snapshot = SeriesSnapshot::compute(
        &history,
        schedule_type,
        months,
        eligibility_complete,
        clinic_found,
    );

    let today = today.unwrap_or_else(age::today);
    let reminders = match (snapshot.next_dose, snapshot.due_date) {
        (Some(next_dose), Some(due_date)) => reminder_plan(next_dose, due_date, &name, today),
        _ => Vec::new(),
    };

    Ok((snapshot, reminders))
}

fn render_schedule(snapshot: &SeriesSnapshot, reminders: &[Reminder]) {
    println!("Vaccination schedule ({})", snapshot.schedule_type.label());
    println!(
        "- Doses recorded: {}/{}",
        snapshot.doses_completed,
        snapshot.schedule_type.total_doses()
    );
    println!("- Progress: {}%", snapshot.progress);

    match (snapshot.next_dose, snapshot.due_date) {
        (Some(dose), Some(due)) => println!("- Next: dose {dose}, due {due}"),
        (Some(dose), None) => println!("- Next: dose {dose}, book at a clinic"),
        _ => println!("- Series complete"),
    }

    if reminders.is_empty() {
        println!("\nReminders: none");
    } else {
        println!("\nReminders");
        for reminder in reminders {
            println!(
                "- {} [{}]: {}",
                reminder.scheduled_date, reminder.title, reminder.body
            );
        }
    }
}

pub(crate) fn run_triage(args: TriageArgs) -> Result<(), AppError> {
    let report = SymptomReport {
        genital_anal_bumps: args.genital_anal_bumps,
        unusual_bleeding: args.unusual_bleeding,
        pain_during_sex: args.pain_during_sex,
        pelvic_pain: args.pelvic_pain,
        discharge_changes: args.discharge_changes,
    };
    let level = classify(&report);
    println!("Symptom check: {}", level.label());
    println!("- {}", level.message());
    Ok(())
}
