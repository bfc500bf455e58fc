use clap::Parser;
use colored::Colorize;
use dirdex::api::{CmdMessage, ConfigAction, DirdexApi, MessageLevel};
use dirdex::cache::{CacheEngine, CacheStatus};
use dirdex::config::DirdexConfig;
use dirdex::error::{DirdexError, Result};
use dirdex::model::{Directory, ExportFormat, FilterSpec, SortKey};
use dirdex::remote::{CancelToken, HttpFetcher};
use dirdex::store::fs::FileStore;
use directories::ProjectDirs;
use std::path::PathBuf;
use unicode_width::UnicodeWidthStr;

mod args;
use args::{Cli, Commands, ConfigCommands};

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {}", "Error:".red(), e);
        std::process::exit(1);
    }
}

struct AppContext {
    api: DirdexApi<FileStore, HttpFetcher>,
    cancel: CancelToken,
    force_refresh: bool,
    printer: Printer,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.debug);
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Commands::Search { query, limit, sort } => handle_search(&mut ctx, &query, &sort, limit),
        Commands::List {
            category,
            limit,
            offset,
            sort,
        } => {
            let spec = FilterSpec {
                categories: category,
                limit,
                offset,
                sort: parse_sort(&sort)?,
                ..Default::default()
            };
            handle_list(&mut ctx, &spec)
        }
        Commands::Filter {
            category,
            pricing,
            link_type,
            dr_min,
            dr_max,
            query,
            limit,
            sort,
        } => {
            let spec = FilterSpec {
                query,
                categories: category,
                pricing,
                link_types: link_type,
                dr_min,
                dr_max,
                limit,
                sort: parse_sort(&sort)?,
                ..Default::default()
            };
            handle_list(&mut ctx, &spec)
        }
        Commands::Show { slug } => handle_show(&mut ctx, &slug),
        Commands::Export {
            format,
            output,
            category,
            pricing,
            dr_min,
        } => {
            let spec = FilterSpec {
                categories: category,
                pricing,
                dr_min,
                ..Default::default()
            };
            let format: ExportFormat = format.parse().map_err(DirdexError::Config)?;
            handle_export(&mut ctx, &spec, format, output)
        }
        Commands::Sync => handle_sync(&mut ctx),
        Commands::Config { action } => handle_config(&mut ctx, action),
    }
}

fn setup_logging(debug: bool) {
    let default_filter = if debug { "dirdex=debug" } else { "dirdex=warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let config_dir = resolve_config_dir()?;
    let config = DirdexConfig::load(&config_dir)?;
    config.validate()?;

    let store = FileStore::new(config.cache_dir_or(&config_dir));
    let remote = HttpFetcher::new(&config.api_url, &config.api_key)?;
    let engine = CacheEngine::new(store, remote, config.ttl());

    Ok(AppContext {
        api: DirdexApi::new(engine, config),
        cancel: CancelToken::new(),
        force_refresh: cli.refresh,
        printer: Printer::new(!cli.no_color),
    })
}

fn resolve_config_dir() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("com", "dirdex", "dirdex")
        .ok_or_else(|| DirdexError::Config("could not determine config directory".to_string()))?;
    Ok(proj_dirs.config_dir().to_path_buf())
}

fn parse_sort(s: &str) -> Result<SortKey> {
    s.parse().map_err(DirdexError::Config)
}

fn handle_search(ctx: &mut AppContext, query: &str, sort: &str, limit: usize) -> Result<()> {
    let sort = parse_sort(sort)?;
    let result = ctx
        .api
        .search(&ctx.cancel, ctx.force_refresh, query, sort, limit)?;

    if !result.listed.is_empty() {
        ctx.printer.table(&result.listed);
        ctx.printer
            .info(&format!("Found {} directories", result.listed.len()));
    }
    ctx.printer.messages(&result.messages);
    Ok(())
}

fn handle_list(ctx: &mut AppContext, spec: &FilterSpec) -> Result<()> {
    let result = ctx.api.list(&ctx.cancel, ctx.force_refresh, spec)?;

    if !result.listed.is_empty() {
        ctx.printer.table(&result.listed);
        ctx.printer.info(&format!(
            "Showing {} of {} directories",
            result.listed.len(),
            result.total
        ));
    }
    ctx.printer.messages(&result.messages);
    Ok(())
}

fn handle_show(ctx: &mut AppContext, slug: &str) -> Result<()> {
    let result = ctx.api.show(&ctx.cancel, slug)?;
    if let Some(dir) = &result.directory {
        ctx.printer.details(dir);
    }
    ctx.printer.messages(&result.messages);
    Ok(())
}

fn handle_export(
    ctx: &mut AppContext,
    spec: &FilterSpec,
    format: ExportFormat,
    output: PathBuf,
) -> Result<()> {
    let result = ctx
        .api
        .export(&ctx.cancel, ctx.force_refresh, spec, format, &output)?;
    ctx.printer.messages(&result.messages);
    Ok(())
}

fn handle_sync(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.sync(&ctx.cancel)?;
    ctx.printer.messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &mut AppContext, action: ConfigCommands) -> Result<()> {
    let action = match action {
        ConfigCommands::Show => ConfigAction::Show,
        ConfigCommands::ClearCache => ConfigAction::ClearCache,
    };
    let result = ctx.api.config(action)?;

    if let Some(config) = &result.config {
        ctx.printer.bold("Configuration:");
        println!("  API URL: {}", config.api_url);
        println!(
            "  Cache Directory: {}",
            config
                .cache_dir
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(default)".to_string())
        );
        println!("  Cache TTL: {}h", config.cache_ttl_hours);
    }
    if let Some(status) = &result.cache_status {
        println!();
        ctx.printer.bold("Cache:");
        ctx.printer.cache_status(status);
    }
    ctx.printer.messages(&result.messages);
    Ok(())
}

/// Presentation collaborator. Color is decided once at construction from
/// flags/config rather than through a process-wide mutable switch.
struct Printer {
    color: bool,
}

const NAME_WIDTH: usize = 40;
const CATEGORY_WIDTH: usize = 30;

impl Printer {
    fn new(color: bool) -> Self {
        Self { color }
    }

    fn messages(&self, messages: &[CmdMessage]) {
        for message in messages {
            let line = if self.color {
                match message.level {
                    MessageLevel::Info => message.content.dimmed().to_string(),
                    MessageLevel::Success => message.content.green().to_string(),
                    MessageLevel::Warning => message.content.yellow().to_string(),
                    MessageLevel::Error => message.content.red().to_string(),
                }
            } else {
                message.content.clone()
            };
            println!("{}", line);
        }
    }

    fn info(&self, text: &str) {
        if self.color {
            println!("{}", text.dimmed());
        } else {
            println!("{}", text);
        }
    }

    fn bold(&self, text: &str) {
        if self.color {
            println!("{}", text.bold());
        } else {
            println!("{}", text);
        }
    }

    fn table(&self, directories: &[Directory]) {
        let header = format!(
            "{:<name$}  {:>3}  {:<cat$}  {:<9}  {:<8}  {:>5}",
            "Name",
            "DR",
            "Category",
            "Pricing",
            "Link",
            "Votes",
            name = NAME_WIDTH,
            cat = CATEGORY_WIDTH,
        );
        self.bold(&header);

        for dir in directories {
            println!(
                "{:<name$}  {:>3}  {:<cat$}  {:<9}  {:<8}  {:>5}",
                pad_to_width(&dir.name, NAME_WIDTH),
                format_rating(dir.domain_rating),
                pad_to_width(&dir.categories.join(", "), CATEGORY_WIDTH),
                dir.pricing,
                dir.link_type,
                dir.helpful_count,
                name = NAME_WIDTH,
                cat = CATEGORY_WIDTH,
            );
        }
    }

    fn details(&self, dir: &Directory) {
        self.bold(&format!("=== {} ===", dir.name));
        println!("URL: {}", dir.url);
        println!("Slug: {}\n", dir.slug);

        if !dir.description.is_empty() {
            self.bold("Description:");
            println!("{}\n", dir.description);
        }

        self.bold("Metrics:");
        println!("  Domain Rating: {}", format_rating(dir.domain_rating));
        if dir.organic_traffic > 0 {
            println!("  Organic Traffic: {}", dir.organic_traffic);
        }
        if dir.organic_keywords > 0 {
            println!("  Organic Keywords: {}", dir.organic_keywords);
        }
        println!("  Helpful Votes: {}", dir.helpful_count);
        println!("  Views: {}\n", dir.view_count);

        self.bold("Details:");
        println!("  Categories: {}", dir.categories.join(", "));
        println!("  Pricing: {}", dir.pricing);
        println!("  Link Type: {}", dir.link_type);
        if !dir.submission_url.is_empty() {
            println!("  Submission URL: {}", dir.submission_url);
        }

        println!();
        self.info(&format!("Created: {}", dir.created_at.format("%Y-%m-%d")));
        self.info(&format!("Updated: {}", dir.updated_at.format("%Y-%m-%d")));
    }

    fn cache_status(&self, status: &CacheStatus) {
        println!("  Present: {}", status.present);
        println!("  Valid: {}", status.valid);
        println!("  Entries: {}", status.count);
        if let Some(age) = status.age {
            let formatter = timeago::Formatter::new();
            let age_str = formatter.convert(age.to_std().unwrap_or_default());
            println!("  Last updated: {}", age_str);
        }
    }
}

fn format_rating(rating: u32) -> String {
    if rating == 0 {
        "N/A".to_string()
    } else {
        rating.to_string()
    }
}

fn pad_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }
    result
}
