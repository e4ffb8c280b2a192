use std::{sync::Arc, time::Duration};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use shared::domain::{CampusId, StudentId};
use sync_core::{CommandDispatcher, HttpDataService, RemoteDataService, Store, SyncPolicy};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod config;
mod forms;
mod render;

use config::load_settings;
use forms::{CampusForm, StudentForm};

#[derive(Parser, Debug)]
#[command(name = "campus-admin", about = "Manage campuses and students on a remote backend")]
struct Cli {
    /// Backend base url, overriding campus.toml and the environment.
    #[arg(long, global = true)]
    api_url: Option<String>,
    #[arg(long, global = true)]
    sync_policy: Option<SyncPolicy>,
    /// Print the updated record or list as JSON.
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(subcommand)]
    Campuses(CampusCommand),
    #[command(subcommand)]
    Students(StudentCommand),
}

#[derive(Subcommand, Debug)]
enum CampusCommand {
    List,
    Show { id: i64 },
    Add(CampusFields),
    Edit {
        id: i64,
        #[command(flatten)]
        fields: CampusFields,
    },
    Delete { id: i64 },
}

#[derive(Subcommand, Debug)]
enum StudentCommand {
    List,
    Show { id: i64 },
    Add(StudentFields),
    Edit {
        id: i64,
        #[command(flatten)]
        fields: StudentFields,
    },
    Delete { id: i64 },
}

#[derive(Args, Debug)]
struct CampusFields {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    address: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    image_url: Option<String>,
}

impl CampusFields {
    fn apply(self, form: &mut CampusForm) {
        if let Some(v) = self.name {
            form.name = v;
        }
        if let Some(v) = self.address {
            form.address = v;
        }
        if let Some(v) = self.description {
            form.description = v;
        }
        if let Some(v) = self.image_url {
            form.image_url = v;
        }
    }
}

#[derive(Args, Debug)]
struct StudentFields {
    #[arg(long)]
    firstname: Option<String>,
    #[arg(long)]
    lastname: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    gpa: Option<String>,
    #[arg(long)]
    image_url: Option<String>,
    /// Campus to enroll at; pass an empty string to unenroll.
    #[arg(long)]
    campus_id: Option<String>,
}

impl StudentFields {
    fn apply(self, form: &mut StudentForm) {
        if let Some(v) = self.firstname {
            form.firstname = v;
        }
        if let Some(v) = self.lastname {
            form.lastname = v;
        }
        if let Some(v) = self.email {
            form.email = v;
        }
        if let Some(v) = self.gpa {
            form.gpa = v;
        }
        if let Some(v) = self.image_url {
            form.image_url = v;
        }
        if let Some(v) = self.campus_id {
            form.campus_id = v;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut settings = load_settings()?;
    if let Some(api_url) = cli.api_url.clone() {
        settings.api_url = api_url;
    }
    if let Some(policy) = cli.sync_policy {
        settings.sync_policy = policy;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let service: Arc<dyn RemoteDataService> = Arc::new(
        HttpDataService::with_timeout(
            &settings.api_url,
            Duration::from_secs(settings.request_timeout_secs),
        )
        .with_context(|| format!("failed to configure backend {}", settings.api_url))?,
    );
    let store = Store::new();
    let subscription = store.subscribe(|snapshot| {
        debug!(
            campus = ?snapshot.campus_id(),
            student = ?snapshot.student_id(),
            campuses = snapshot.all_campuses.len(),
            students = snapshot.all_students.len(),
            "snapshot updated"
        );
    });
    let dispatcher =
        CommandDispatcher::new(service, Arc::clone(&store)).with_sync_policy(settings.sync_policy);
    debug!(api_url = %settings.api_url, policy = %dispatcher.sync_policy(), "campus-admin starting");

    let result = match cli.command {
        Command::Campuses(command) => run_campus_command(&dispatcher, command, cli.json).await,
        Command::Students(command) => run_student_command(&dispatcher, command, cli.json).await,
    };
    subscription.unsubscribe();
    result
}

async fn run_campus_command(
    dispatcher: &CommandDispatcher,
    command: CampusCommand,
    json: bool,
) -> Result<()> {
    match command {
        CampusCommand::List => {
            dispatcher
                .fetch_all_campuses()
                .await
                .context("failed to load campuses")?;
            let snapshot = dispatcher.store().snapshot();
            emit(json, &snapshot.all_campuses, || {
                render::campus_list(&snapshot.all_campuses)
            })
        }
        CampusCommand::Show { id } => {
            let campus = dispatcher
                .fetch_campus(CampusId(id))
                .await
                .with_context(|| format!("failed to load campus {id}"))?;
            emit(json, &campus, || render::campus_detail(&campus))
        }
        CampusCommand::Add(fields) => {
            let mut form = CampusForm::default();
            fields.apply(&mut form);
            let draft = form.validate()?;
            let campus = dispatcher
                .add_campus(&draft)
                .await
                .context("failed to add campus")?;
            emit(json, &campus, || {
                format!(
                    "Created campus #{}, view it at {}",
                    campus.id,
                    render::campus_path(&campus)
                )
            })
        }
        CampusCommand::Edit { id, fields } => {
            let current = dispatcher
                .fetch_campus(CampusId(id))
                .await
                .with_context(|| format!("failed to load campus {id}"))?;
            let mut form = CampusForm::from(&current);
            fields.apply(&mut form);
            let draft = form.validate()?;
            let campus = dispatcher
                .edit_campus(current.id, &draft)
                .await
                .with_context(|| format!("failed to update campus {id}"))?;
            emit(json, &campus, || render::campus_detail(&campus))
        }
        CampusCommand::Delete { id } => {
            let deleted = dispatcher
                .delete_campus(CampusId(id))
                .await
                .with_context(|| format!("failed to delete campus {id}"))?;
            emit(json, &deleted, || format!("Deleted campus #{deleted}"))
        }
    }
}

async fn run_student_command(
    dispatcher: &CommandDispatcher,
    command: StudentCommand,
    json: bool,
) -> Result<()> {
    match command {
        StudentCommand::List => {
            dispatcher
                .fetch_all_students()
                .await
                .context("failed to load students")?;
            let snapshot = dispatcher.store().snapshot();
            emit(json, &snapshot.all_students, || {
                render::student_list(&snapshot.all_students)
            })
        }
        StudentCommand::Show { id } => {
            let student = dispatcher
                .fetch_student(StudentId(id))
                .await
                .with_context(|| format!("failed to load student {id}"))?;
            emit(json, &student, || render::student_detail(&student))
        }
        StudentCommand::Add(fields) => {
            let mut form = StudentForm::default();
            fields.apply(&mut form);
            let draft = form.validate()?;
            let student = dispatcher
                .add_student(&draft)
                .await
                .context("failed to add student")?;
            emit(json, &student, || {
                format!(
                    "Created student #{}, view them at {}",
                    student.id,
                    render::student_path(&student)
                )
            })
        }
        StudentCommand::Edit { id, fields } => {
            let current = dispatcher
                .fetch_student(StudentId(id))
                .await
                .with_context(|| format!("failed to load student {id}"))?;
            let mut form = StudentForm::from(&current);
            fields.apply(&mut form);
            let draft = form.validate()?;
            let student = dispatcher
                .edit_student(current.id, &draft)
                .await
                .with_context(|| format!("failed to update student {id}"))?;
            emit(json, &student, || render::student_detail(&student))
        }
        StudentCommand::Delete { id } => {
            let deleted = dispatcher
                .delete_student(StudentId(id))
                .await
                .with_context(|| format!("failed to delete student {id}"))?;
            emit(json, &deleted, || format!("Deleted student #{deleted}"))
        }
    }
}

fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce() -> String) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", text().trim_end());
    }
    Ok(())
}
