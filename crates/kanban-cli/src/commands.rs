use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use kanban_core::attachment::format_file_size;
use kanban_core::column::{column_color, UpdateColumn, COLUMN_COLORS};
use kanban_core::settings::{Catalog, FontSize, Settings, Theme};
use kanban_core::task::{CreateTask, Task, TaskQuery, UpdateTask};
use kanban_service::BoardService;
use tracing::debug;

use crate::cli::{ColumnCmd, Command, FilterArgs, LabelCmd, ProjectCmd, SettingsCmd, TaskCmd};

pub fn run(svc: &BoardService, project: Option<&str>, command: Command) -> Result<()> {
    match command {
        Command::Project(cmd) => project_cmd(svc, cmd),
        Command::Column(cmd) => column_cmd(svc, &project_id(svc, project)?, cmd),
        Command::Task(cmd) => task_cmd(svc, &project_id(svc, project)?, cmd),
        Command::Settings(cmd) => settings_cmd(svc, cmd),
        Command::Board(filter) => print_board(svc, &project_id(svc, project)?, &filter),
    }
}

/// The `--project` override, or the current project.
fn project_id(svc: &BoardService, project: Option<&str>) -> Result<String> {
    match project {
        Some(id) => {
            svc.db().get_project(id)?;
            Ok(id.to_string())
        }
        None => Ok(svc.current_project()?.id),
    }
}

fn query(filter: &FilterArgs) -> TaskQuery {
    TaskQuery::from_inputs(&filter.search, &filter.priority, &filter.task_type)
}

// -- Projects --

fn project_cmd(svc: &BoardService, cmd: ProjectCmd) -> Result<()> {
    match cmd {
        ProjectCmd::List => {
            let current = svc.current_project()?.id;
            for p in svc.list_projects()? {
                let marker = if p.id == current { "*" } else { " " };
                println!("{marker} {:<24} {}", p.id, p.name);
            }
        }
        ProjectCmd::Create { name } => {
            let p = svc.create_project(&name)?;
            println!("{}", p.id);
        }
        ProjectCmd::Rename { id, name } => {
            let p = svc.rename_project(&id, &name)?;
            eprintln!("Renamed {} to {}", p.id, p.name);
        }
        ProjectCmd::Delete { id } => {
            svc.delete_project(&id)?;
            eprintln!("Deleted project {id}");
        }
        ProjectCmd::Select { id } => {
            let p = svc.select_project(&id)?;
            eprintln!("Switched to {}", p.name);
        }
    }
    Ok(())
}

// -- Columns --

fn column_cmd(svc: &BoardService, project: &str, cmd: ColumnCmd) -> Result<()> {
    match cmd {
        ColumnCmd::List => {
            for c in svc.list_columns(project)? {
                println!("{:>3}  {:<24} {:<9} {}", c.position, c.id, c.color, c.title);
            }
        }
        ColumnCmd::Add { title, color } => {
            let color = color.as_deref().map(parse_column_color).transpose()?;
            let c = svc.add_column(project, &title, color.as_deref())?;
            println!("{}", c.id);
        }
        ColumnCmd::Edit { id, title, color } => {
            if title.is_none() && color.is_none() {
                bail!("nothing to change; pass --title or --color");
            }
            let update = UpdateColumn {
                title,
                color: color.as_deref().map(parse_column_color).transpose()?,
                position: None,
            };
            svc.update_column(project, &id, &update)?;
        }
        ColumnCmd::Colors => {
            for (name, hex) in COLUMN_COLORS {
                println!("{name:<8} {hex}");
            }
        }
        ColumnCmd::Delete { id } => {
            svc.delete_column(project, &id)?;
            eprintln!("Deleted column {id} and its tasks");
        }
        ColumnCmd::Reorder { ids } => {
            for c in svc.reorder_columns(project, &ids)? {
                println!("{:>3}  {}", c.position, c.title);
            }
        }
    }
    Ok(())
}

fn parse_column_color(input: &str) -> Result<String> {
    column_color(input).ok_or_else(|| {
        let names: Vec<&str> = COLUMN_COLORS.iter().map(|(name, _)| *name).collect();
        anyhow!("unknown color '{input}', expected a hex value or one of {}", names.join(", "))
    })
}

// -- Tasks --

fn task_cmd(svc: &BoardService, project: &str, cmd: TaskCmd) -> Result<()> {
    match cmd {
        TaskCmd::List { column, filter } => {
            let settings = svc.settings()?;
            for t in svc.filtered_tasks(project, &column, &query(&filter))? {
                print_task_line(&settings, &t);
            }
        }
        TaskCmd::Show { id } => print_task(&svc.get_task(&id)?),
        TaskCmd::Add {
            column,
            title,
            description,
            priority,
            task_type,
        } => {
            let task = svc.add_task(&CreateTask {
                project_id: project.to_string(),
                column_id: column,
                title,
                description,
                priority,
                task_type,
                attachments: vec![],
                position: None,
            })?;
            println!("{}", task.id);
        }
        TaskCmd::Edit {
            id,
            title,
            description,
            priority,
            task_type,
            comments,
        } => {
            let update = UpdateTask {
                title,
                description,
                priority,
                task_type,
                comments_count: comments,
                ..Default::default()
            };
            svc.update_task(&id, &update)?;
        }
        TaskCmd::Move { id, column } => {
            let task = svc.move_task(&id, &column)?;
            eprintln!("Moved {} to {}", task.id, task.column_id);
        }
        TaskCmd::Delete { id } => {
            svc.delete_task(&id)?;
            eprintln!("Deleted task {id}");
        }
        TaskCmd::Attach { id, file, mime } => {
            let bytes = fs::read(&file).with_context(|| format!("reading {}", file.display()))?;
            let name = file
                .file_name()
                .and_then(|n| n.to_str())
                .ok_or_else(|| anyhow!("{} has no usable file name", file.display()))?;
            let mime = mime.unwrap_or_else(|| guess_mime(&file).to_string());
            debug!(file = %file.display(), mime = %mime, "attaching");
            let att = svc.attach_file(&id, name, &mime, &bytes)?;
            println!("{}", att.id);
        }
        TaskCmd::Detach { id, attachment } => {
            svc.remove_attachment(&id, &attachment)?;
        }
        TaskCmd::Download {
            id,
            attachment,
            out,
        } => {
            let att = svc.attachment(&id, &attachment)?;
            let path = match out {
                Some(path) => path,
                None => download_name(&att.name)?,
            };
            fs::write(&path, att.bytes()?).with_context(|| format!("writing {}", path.display()))?;
            eprintln!("Saved {} ({})", path.display(), format_file_size(att.size));
        }
    }
    Ok(())
}

/// Local file name for a stored attachment name, dropping any directory
/// components so the file lands in the working directory.
fn download_name(stored: &str) -> Result<PathBuf> {
    Path::new(stored)
        .file_name()
        .map(PathBuf::from)
        .ok_or_else(|| anyhow!("attachment name '{stored}' is not a file name; pass --out"))
}

/// MIME type from the file extension, for attachments added from disk.
fn guess_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "csv" => "text/csv",
        "txt" | "md" => "text/plain",
        "json" => "application/json",
        _ => "application/octet-stream",
    }
}

fn print_task_line(settings: &Settings, t: &Task) {
    println!(
        "{:<20} [{} {}] [{} {}] {}",
        t.id,
        t.priority,
        settings.priority_color(&t.priority),
        t.task_type,
        settings.type_color(&t.task_type),
        t.title,
    );
}

fn print_task(t: &Task) {
    println!("id:          {}", t.id);
    println!("title:       {}", t.title);
    println!("column:      {}", t.column_id);
    println!("priority:    {}", t.priority);
    println!("type:        {}", t.task_type);
    println!("comments:    {}", t.comments_count);
    println!("created:     {}", t.created_at.format("%Y-%m-%d %H:%M"));
    if !t.description.is_empty() {
        println!("\n{}", t.description);
    }
    if !t.attachments.is_empty() {
        println!("\nattachments:");
        for a in &t.attachments {
            println!(
                "  {:<20} {:<30} {:>10}  {}",
                a.id,
                a.name,
                format_file_size(a.size),
                a.kind().as_str()
            );
        }
    }
}

fn print_board(svc: &BoardService, project: &str, filter: &FilterArgs) -> Result<()> {
    let name = svc.db().get_project(project)?.name;
    let settings = svc.settings()?;
    println!("# {name}");
    for col in svc.board(project, &query(filter))? {
        println!("\n## {} ({})", col.column.title, col.tasks.len());
        for t in &col.tasks {
            print_task_line(&settings, t);
        }
    }
    Ok(())
}

// -- Settings --

fn settings_cmd(svc: &BoardService, cmd: SettingsCmd) -> Result<()> {
    let settings = match cmd {
        SettingsCmd::Show => svc.settings()?,
        SettingsCmd::Theme { theme } => {
            let theme = Theme::parse_str(&theme).ok_or_else(|| {
                let names: Vec<&str> = Theme::ALL.iter().map(|t| t.as_str()).collect();
                anyhow!("unknown theme '{theme}', expected one of {}", names.join(", "))
            })?;
            svc.set_theme(theme)?
        }
        SettingsCmd::FontSize { size } => {
            let size = FontSize::parse_str(&size)
                .ok_or_else(|| anyhow!("unknown font size '{size}', expected small, medium or large"))?;
            svc.set_font_size(size)?
        }
        SettingsCmd::Compact { on } => svc.set_compact_mode(on)?,
        SettingsCmd::Animations { on } => svc.set_animations(on)?,
        SettingsCmd::AutoSave { on } => svc.set_auto_save(on)?,
        SettingsCmd::Priority(cmd) => label_cmd(svc, Catalog::Priorities, cmd)?,
        SettingsCmd::Type(cmd) => label_cmd(svc, Catalog::TaskTypes, cmd)?,
    };
    print_settings(&settings);
    Ok(())
}

fn label_cmd(svc: &BoardService, which: Catalog, cmd: LabelCmd) -> Result<Settings> {
    Ok(match cmd {
        LabelCmd::List => svc.settings()?,
        LabelCmd::Add { name, color } => {
            let color = match color {
                Some(color) => color,
                None => svc.settings()?.next_swatch(which).to_string(),
            };
            svc.add_label(which, &name, &color)?
        }
        LabelCmd::Remove { name } => svc.remove_label(which, &name)?,
        LabelCmd::Recolor { name, color } => svc.recolor_label(which, &name, &color)?,
        LabelCmd::Default { name } => svc.set_default_label(which, &name)?,
    })
}

fn print_settings(s: &Settings) {
    println!("theme:        {} ({})", s.theme, s.theme.display_name());
    println!("font size:    {}", s.font_size.as_str());
    println!("compact:      {}", s.compact_mode);
    println!("animations:   {}", s.animations_enabled);
    println!("auto save:    {}", s.auto_save);
    for which in [Catalog::Priorities, Catalog::TaskTypes] {
        let default = match which {
            Catalog::Priorities => &s.default_priority,
            Catalog::TaskTypes => &s.default_type,
        };
        println!("\n{}:", which.noun());
        for label in s.catalog(which) {
            let marker = if &label.name == default { "*" } else { " " };
            println!("{marker} {:<16} {}", label.name, label.color);
        }
    }
}
