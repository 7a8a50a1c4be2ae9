use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use uuid::Uuid;

use backend_client::{AuthClient, Session, SessionFile, TracedClient};
use listview::{ListQuery, SortOrder};
use notes::{all_tags, NotePatch, NotesService};
use planner::{PlannerService, Recurrence};
use profile::{initials, ProfileService};
use quiz::{Category, Difficulty, Progress, QuizRound, TriviaClient};
use runtime::{AppConfig, CliArgs};
use todos::{StatusFilter, TodoService};
use wikisearch::{article_url, WikiClient, PAGE_SIZE};

/// CourseCorrect - student productivity client
#[derive(Parser)]
#[command(name = "coursecorrect")]
#[command(about = "CourseCorrect - student productivity client")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and store the session locally
    Login {
        email: String,
        /// Password (prompted on stdin when omitted)
        #[arg(long)]
        password: Option<String>,
    },
    /// Create an account and its profile
    Register {
        email: String,
        /// Display name for the new profile
        #[arg(long)]
        name: String,
        #[arg(long)]
        password: Option<String>,
    },
    /// Sign out and discard the stored session
    Logout,
    /// Change the signed-in user's password
    ChangePassword {
        #[arg(long)]
        password: Option<String>,
    },
    /// Course notes
    Notes {
        #[command(subcommand)]
        command: NotesCommand,
    },
    /// Scheduled planner tasks
    Planner {
        #[command(subcommand)]
        command: PlannerCommand,
    },
    /// Simple to-do list
    Todo {
        #[command(subcommand)]
        command: TodoCommand,
    },
    /// Play a ten-question trivia round
    Quiz {
        /// general, computer-science, sports, history, science
        #[arg(long, default_value = "general")]
        category: String,
        /// easy, medium or hard
        #[arg(long, default_value = "easy")]
        difficulty: String,
    },
    /// Search the encyclopedia
    Search {
        term: String,
        /// 1-based result page
        #[arg(long, default_value_t = 1)]
        page: u64,
    },
    /// Profile and avatar
    Profile {
        #[command(subcommand)]
        command: ProfileCommand,
    },
    /// Greeting and per-collection counts
    Dashboard,
}

#[derive(Subcommand)]
enum NotesCommand {
    /// List notes, newest first
    List {
        /// Case-insensitive substring match on title, content or tags
        #[arg(long)]
        search: Option<String>,
        /// Keep only notes carrying exactly this tag
        #[arg(long)]
        tag: Option<String>,
        /// Oldest first instead of newest first
        #[arg(long)]
        oldest: bool,
    },
    /// Create a note
    Add {
        title: String,
        content: String,
        /// Comma-separated tags
        #[arg(long, default_value = "")]
        tags: String,
    },
    /// Flip a note's done flag
    Toggle { id: Uuid },
    /// Update parts of a note
    Edit {
        id: Uuid,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
        /// Comma-separated tags (replaces the existing set)
        #[arg(long)]
        tags: Option<String>,
    },
    /// Delete a note
    Delete {
        id: Uuid,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// List every tag in use
    Tags,
}

#[derive(Subcommand)]
enum PlannerCommand {
    /// List tasks in chronological order
    List,
    /// Schedule a task
    Add {
        title: String,
        /// RFC 3339 timestamp, e.g. 2026-03-02T09:00:00Z
        #[arg(long)]
        at: String,
        /// none, daily, weekly or monthly
        #[arg(long, default_value = "none")]
        repeat: String,
    },
    /// Replace a task's title, time and recurrence
    Edit {
        id: Uuid,
        title: String,
        #[arg(long)]
        at: String,
        #[arg(long, default_value = "none")]
        repeat: String,
    },
    /// Delete a task
    Delete { id: Uuid },
}

#[derive(Subcommand)]
enum TodoCommand {
    /// List to-dos
    List {
        /// all, active or completed
        #[arg(long, default_value = "all")]
        filter: String,
        /// Oldest first instead of newest first
        #[arg(long)]
        asc: bool,
    },
    /// Add a to-do
    Add { title: String },
    /// Flip a to-do's completed flag
    Toggle { id: Uuid },
    /// Delete a to-do
    Delete { id: Uuid },
}

#[derive(Subcommand)]
enum ProfileCommand {
    /// Show the signed-in user's profile
    Show,
    /// Upload a JPEG avatar and store its public URL
    SetAvatar { file: PathBuf },
    /// Change the display name
    SetName { name: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        verbose: cli.verbose,
    };

    // Load configuration (normalized home_dir is applied inside)
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    let logging = config.logging.clone().unwrap_or_default();
    runtime::logging::init_logging_from_config(&logging, Path::new(&config.backend.home_dir));
    tracing::debug!("CourseCorrect starting");

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    let command = cli
        .command
        .ok_or_else(|| anyhow!("No command given; run `coursecorrect --help`"))?;

    let app = App::new(config);
    app.run(command).await
}

/// Shared wiring: configuration, the traced HTTP client and the on-disk
/// session.
struct App {
    config: AppConfig,
    http: TracedClient,
    sessions: SessionFile,
}

impl App {
    fn new(config: AppConfig) -> Self {
        let sessions = SessionFile::in_dir(Path::new(&config.backend.home_dir));
        Self {
            config,
            http: TracedClient::default(),
            sessions,
        }
    }

    fn auth(&self) -> Result<AuthClient> {
        Ok(AuthClient::new(
            self.http.clone(),
            &self.config.backend.url,
            &self.config.backend.anon_key,
        )?)
    }

    fn notes(&self) -> Result<NotesService> {
        Ok(NotesService::new(
            self.http.clone(),
            &self.config.backend.url,
            &self.config.backend.anon_key,
        )?)
    }

    fn planner(&self) -> Result<PlannerService> {
        Ok(PlannerService::new(
            self.http.clone(),
            &self.config.backend.url,
            &self.config.backend.anon_key,
        )?)
    }

    fn todos(&self) -> Result<TodoService> {
        Ok(TodoService::new(
            self.http.clone(),
            &self.config.backend.url,
            &self.config.backend.anon_key,
        )?)
    }

    fn profile(&self) -> Result<ProfileService> {
        Ok(ProfileService::new(
            self.http.clone(),
            &self.config.backend.url,
            &self.config.backend.anon_key,
            &self.config.backend.avatar_bucket,
        )?)
    }

    fn session(&self) -> Result<Session> {
        self.sessions
            .load()?
            .ok_or_else(|| anyhow!("Not signed in; run `coursecorrect login <email>` first"))
    }

    async fn run(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Login { email, password } => self.login(&email, password).await,
            Commands::Register {
                email,
                name,
                password,
            } => self.register(&email, &name, password).await,
            Commands::Logout => self.logout().await,
            Commands::ChangePassword { password } => self.change_password(password).await,
            Commands::Notes { command } => self.notes_command(command).await,
            Commands::Planner { command } => self.planner_command(command).await,
            Commands::Todo { command } => self.todo_command(command).await,
            Commands::Quiz {
                category,
                difficulty,
            } => self.quiz(&category, &difficulty).await,
            Commands::Search { term, page } => self.search(&term, page).await,
            Commands::Profile { command } => self.profile_command(command).await,
            Commands::Dashboard => self.dashboard().await,
        }
    }

    // ----- auth -----

    async fn login(&self, email: &str, password: Option<String>) -> Result<()> {
        let password = password_or_prompt(password, "Password: ")?;
        let session = self.auth()?.sign_in(email, &password).await?;
        self.sessions.save(&session)?;
        println!("Signed in as {email}");
        Ok(())
    }

    async fn register(&self, email: &str, name: &str, password: Option<String>) -> Result<()> {
        let password = password_or_prompt(password, "Password: ")?;
        let signup = self.auth()?.sign_up(email, &password).await?;

        match signup.session {
            Some(session) => {
                self.sessions.save(&session)?;
                self.profile()?.create(&session, name, email).await?;
                println!("Registered and signed in as {email}");
            }
            None => {
                // Email confirmation is on; the profile gets created on
                // the first signed-in run.
                println!("Registered. Confirm your email, then run `coursecorrect login {email}`");
            }
        }
        Ok(())
    }

    async fn logout(&self) -> Result<()> {
        if let Some(session) = self.sessions.load()? {
            self.auth()?.sign_out(&session).await?;
        }
        self.sessions.clear()?;
        println!("Signed out");
        Ok(())
    }

    async fn change_password(&self, password: Option<String>) -> Result<()> {
        let session = self.session()?;
        let password = password_or_prompt(password, "New password: ")?;
        self.auth()?.update_password(&session, &password).await?;
        println!("Password changed");
        Ok(())
    }

    // ----- notes -----

    async fn notes_command(&self, command: NotesCommand) -> Result<()> {
        let session = self.session()?;
        let notes = self.notes()?;

        match command {
            NotesCommand::List {
                search,
                tag,
                oldest,
            } => {
                let mut query = ListQuery::new().order(if oldest {
                    SortOrder::OldestFirst
                } else {
                    SortOrder::NewestFirst
                });
                if let Some(term) = search {
                    query = query.search(term);
                }
                if let Some(tag) = tag {
                    query = query.tag(tag);
                }

                let listed = notes.list(&session, &query).await?;
                if listed.is_empty() {
                    println!("No notes");
                }
                for note in listed {
                    let mark = if note.is_done { "x" } else { " " };
                    let tags = if note.tags.is_empty() {
                        String::new()
                    } else {
                        format!("  [{}]", note.tags.join(", "))
                    };
                    println!("[{mark}] {}  {}{tags}", note.id, note.title);
                    println!("    {}", note.content);
                }
            }
            NotesCommand::Add {
                title,
                content,
                tags,
            } => {
                let note = notes.add(&session, &title, &content, &tags).await?;
                println!("Created note {}", note.id);
            }
            NotesCommand::Toggle { id } => {
                let all = notes.list(&session, &ListQuery::new()).await?;
                let note = all
                    .iter()
                    .find(|n| n.id == id)
                    .ok_or_else(|| anyhow!("No note with id {id}"))?;
                notes.toggle_done(&session, note).await?;
                println!("Note {} is now {}", id, if note.is_done { "open" } else { "done" });
            }
            NotesCommand::Edit {
                id,
                title,
                content,
                tags,
            } => {
                if title.is_none() && content.is_none() && tags.is_none() {
                    bail!("Nothing to change; pass --title, --content or --tags");
                }
                let patch = NotePatch {
                    title,
                    content,
                    tags: tags.as_deref().map(notes::parse_tags),
                    is_done: None,
                };
                notes.edit(&session, id, patch).await?;
                println!("Updated note {id}");
            }
            NotesCommand::Delete { id, yes } => {
                if !yes && !confirm(&format!("Delete note {id}?"))? {
                    println!("Cancelled");
                    return Ok(());
                }
                notes.delete(&session, id).await?;
                println!("Deleted note {id}");
            }
            NotesCommand::Tags => {
                let all = notes.list(&session, &ListQuery::new()).await?;
                for tag in all_tags(&all) {
                    println!("{tag}");
                }
            }
        }
        Ok(())
    }

    // ----- planner -----

    async fn planner_command(&self, command: PlannerCommand) -> Result<()> {
        let session = self.session()?;
        let planner = self.planner()?;

        match command {
            PlannerCommand::List => {
                let tasks = planner.list(&session).await?;
                if tasks.is_empty() {
                    println!("No scheduled tasks");
                }
                for task in tasks {
                    let repeat = match task.recurring {
                        Recurrence::None => String::new(),
                        other => format!("  (repeats {})", other.as_str()),
                    };
                    println!(
                        "{}  {}  {}{repeat}",
                        task.id,
                        task.datetime.to_rfc3339(),
                        task.title
                    );
                }
            }
            PlannerCommand::Add { title, at, repeat } => {
                let datetime = parse_datetime(&at)?;
                let recurring = parse_recurrence(&repeat)?;
                planner
                    .save(&session, None, &title, datetime, recurring)
                    .await?;
                println!("Scheduled {title}");
            }
            PlannerCommand::Edit {
                id,
                title,
                at,
                repeat,
            } => {
                let datetime = parse_datetime(&at)?;
                let recurring = parse_recurrence(&repeat)?;
                planner
                    .save(&session, Some(id), &title, datetime, recurring)
                    .await?;
                println!("Updated task {id}");
            }
            PlannerCommand::Delete { id } => {
                planner.delete(&session, id).await?;
                println!("Deleted task {id}");
            }
        }
        Ok(())
    }

    // ----- to-dos -----

    async fn todo_command(&self, command: TodoCommand) -> Result<()> {
        let session = self.session()?;
        let todos = self.todos()?;

        match command {
            TodoCommand::List { filter, asc } => {
                let filter = StatusFilter::parse(&filter)
                    .ok_or_else(|| anyhow!("Unknown filter '{filter}'; use all, active or completed"))?;
                let order = if asc {
                    SortOrder::OldestFirst
                } else {
                    SortOrder::NewestFirst
                };
                let listed = todos.list(&session, filter, order).await?;
                if listed.is_empty() {
                    println!("Nothing to do");
                }
                for item in listed {
                    let mark = if item.completed { "x" } else { " " };
                    println!("[{mark}] {}  {}", item.id, item.title);
                }
            }
            TodoCommand::Add { title } => {
                let item = todos.add(&session, &title).await?;
                println!("Added {}", item.id);
            }
            TodoCommand::Toggle { id } => {
                let all = todos
                    .list(&session, StatusFilter::All, SortOrder::NewestFirst)
                    .await?;
                let item = all
                    .iter()
                    .find(|t| t.id == id)
                    .ok_or_else(|| anyhow!("No to-do with id {id}"))?;
                todos.toggle(&session, item).await?;
                println!(
                    "To-do {} is now {}",
                    id,
                    if item.completed { "active" } else { "completed" }
                );
            }
            TodoCommand::Delete { id } => {
                todos.delete(&session, id).await?;
                println!("Deleted to-do {id}");
            }
        }
        Ok(())
    }

    // ----- quiz -----

    async fn quiz(&self, category: &str, difficulty: &str) -> Result<()> {
        let category = Category::parse(category)
            .ok_or_else(|| anyhow!("Unknown category '{category}'"))?;
        let difficulty = Difficulty::parse(difficulty)
            .ok_or_else(|| anyhow!("Unknown difficulty '{difficulty}'; use easy, medium or hard"))?;

        let client = TriviaClient::new(self.http.clone(), &self.config.apis.trivia_url)?;
        let questions = client.fetch_round(category, difficulty).await?;
        let mut round = QuizRound::new(questions);

        println!("{} ({})", category.label(), difficulty.as_str());
        let stdin = io::stdin();
        loop {
            // Clone the current question out so answering can borrow the
            // round mutably.
            let (index, total, question) = match round.progress() {
                Progress::Question {
                    index,
                    total,
                    question,
                    ..
                } => (index, total, question.clone()),
                Progress::Finished { score, total } => {
                    println!();
                    println!("Final score: {score}/{total}");
                    return Ok(());
                }
            };

            println!();
            println!("Question {}/{}: {}", index + 1, total, question.text);
            for (i, answer) in question.answers.iter().enumerate() {
                println!("  {}) {answer}", i + 1);
            }

            let choice = loop {
                print!("> ");
                io::stdout().flush()?;
                let mut line = String::new();
                if stdin.lock().read_line(&mut line)? == 0 {
                    bail!("Input closed mid-round");
                }
                match line.trim().parse::<usize>() {
                    Ok(n) if (1..=question.answers.len()).contains(&n) => {
                        break question.answers[n - 1].clone()
                    }
                    _ => println!("Pick a number from 1 to {}", question.answers.len()),
                }
            };

            match round.answer(&choice) {
                Some(true) => println!("Correct!"),
                Some(false) => println!("Wrong; the answer was {}", question.correct),
                None => {}
            }
            round.advance();
        }
    }

    // ----- search -----

    async fn search(&self, term: &str, page: u64) -> Result<()> {
        if page == 0 {
            bail!("Pages are numbered from 1");
        }
        let client = WikiClient::new(self.http.clone(), &self.config.apis.wiki_url)?;
        let results = client.search(term, (page - 1) * PAGE_SIZE).await?;

        println!("{} results for \"{term}\" (page {page})", results.total_hits);
        for hit in &results.hits {
            println!();
            println!("{}", hit.title);
            println!("  {}", hit.snippet);
            println!("  {}", article_url(&hit.title));
        }
        if results.has_next() {
            println!();
            println!("More: --page {}", page + 1);
        }
        Ok(())
    }

    // ----- profile & dashboard -----

    async fn profile_command(&self, command: ProfileCommand) -> Result<()> {
        let session = self.session()?;
        let profile = self.profile()?;

        match command {
            ProfileCommand::Show => {
                let p = profile.fetch(&session).await?;
                println!("{}", p.full_name);
                println!("{}", p.email);
                if let Some(url) = p.avatar_url {
                    println!("{url}");
                }
            }
            ProfileCommand::SetAvatar { file } => {
                let jpeg = std::fs::read(&file)
                    .with_context(|| format!("Failed to read {}", file.display()))?;
                let url = profile.set_avatar(&session, jpeg).await?;
                println!("{url}");
            }
            ProfileCommand::SetName { name } => {
                profile.update_full_name(&session, &name).await?;
                println!("Name updated");
            }
        }
        Ok(())
    }

    async fn dashboard(&self) -> Result<()> {
        let session = self.session()?;
        let profile = self.profile()?;

        let p = profile.fetch(&session).await?;
        let counts = profile.dashboard_counts(&session).await?;

        println!("Hello, {} ({})", p.full_name, initials(&p.full_name));
        println!("Notes:   {}", counts.notes);
        println!("Planner: {}", counts.tasks);
        println!("To-dos:  {}", counts.todos);
        Ok(())
    }
}

fn password_or_prompt(password: Option<String>, prompt: &str) -> Result<String> {
    if let Some(p) = password {
        return Ok(p);
    }
    print!("{prompt}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let password = line.trim_end_matches(['\r', '\n']).to_string();
    if password.is_empty() {
        bail!("Password must not be empty");
    }
    Ok(password)
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(matches!(line.trim(), "y" | "Y" | "yes"))
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("Invalid timestamp '{s}'; expected RFC 3339, e.g. 2026-03-02T09:00:00Z"))
}

fn parse_recurrence(s: &str) -> Result<Recurrence> {
    Recurrence::parse(s)
        .ok_or_else(|| anyhow!("Unknown recurrence '{s}'; use none, daily, weekly or monthly"))
}
