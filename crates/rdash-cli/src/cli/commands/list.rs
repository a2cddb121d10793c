//! `rdash list`: seeded records through the dashboard's query and paging.

use anyhow::{Context, Result};
use chrono::Utc;
use comfy_table::{ContentArrangement, Table};
use rdash_core::config::Config;
use rdash_core::project::Project;
use rdash_core::seed::{self, MockData};
use rdash_core::status::ProjectStatus;
use rdash_core::store::{
    MemoryRepository, Page, PageRequest, ProjectQuery, Repository, TeamSizeBucket, TokenQuery,
};
use rdash_core::token::{Token, ValidationStatus};

/// Which dataset to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ListKind {
    Tokens,
    Requests,
    Projects,
    MyProjects,
}

/// Filters shared by every dataset. Unused ones are ignored.
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Project id (tokens) or project name substring.
    pub search: Option<String>,
    pub email: Option<String>,
    pub status: Option<String>,
    pub team_size: Option<TeamSizeBucket>,
    pub page: usize,
}

pub fn run(kind: ListKind, options: &ListOptions, config: &Config) -> Result<()> {
    let mut rng = seed::rng_from(config.mock.seed);
    let data = MockData::generate(&mut rng, Utc::now());
    let search = options.search.clone().unwrap_or_default();

    match kind {
        ListKind::Tokens => {
            let status = options
                .status
                .as_deref()
                .map(str::parse::<ValidationStatus>)
                .transpose()
                .context("invalid --status for tokens")?;
            let query = TokenQuery {
                project_id: search,
                email: options.email.clone().unwrap_or_default(),
                status,
            };
            let repo = MemoryRepository::from_records(data.tokens)?;
            let page = repo.list(&query, PageRequest::new(options.page, config.pages.tokens));
            print_tokens(&page);
        }
        ListKind::Requests | ListKind::Projects | ListKind::MyProjects => {
            let status = options
                .status
                .as_deref()
                .map(str::parse::<ProjectStatus>)
                .transpose()
                .context("invalid --status for projects")?;
            let query = ProjectQuery {
                name: search,
                status,
                team_size: options.team_size,
            };
            let (records, per_page) = match kind {
                ListKind::Requests => (data.requests, config.pages.requests),
                ListKind::Projects => (data.projects, config.pages.projects),
                _ => (data.my_projects, config.pages.projects),
            };
            let repo = MemoryRepository::from_records(records)?;
            let page = repo.list(&query, PageRequest::new(options.page, per_page));
            print_projects(&page);
        }
    }
    Ok(())
}

fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header.to_vec());
    table
}

fn print_footer<T>(page: &Page<T>) {
    println!(
        "Page {} ({} matching, {} per page)",
        page.position_label(),
        page.total_items,
        page.per_page
    );
}

fn print_tokens(page: &Page<Token>) {
    if page.items.is_empty() {
        println!("No tokens match.");
        return;
    }
    let mut table = new_table(&["Project", "Email", "Status", "Last validated", "Updated"]);
    for token in &page.items {
        table.add_row(vec![
            token.project_id.clone(),
            token.email.clone(),
            token.validation_status.label().to_string(),
            token.last_validation_date.format("%Y-%m-%d").to_string(),
            token.updated_at.format("%Y-%m-%d %H:%M").to_string(),
        ]);
    }
    println!("{table}");
    print_footer(page);
}

fn print_projects(page: &Page<Project>) {
    if page.items.is_empty() {
        println!("No projects match.");
        return;
    }
    let mut table = new_table(&["ID", "Name", "Status", "Team", "Duration", "Created"]);
    for project in &page.items {
        table.add_row(vec![
            project.id.clone(),
            project.name.clone(),
            project.status.label().to_string(),
            project.team_size.to_string(),
            format!("{} months", project.expected_duration_months),
            project.created_at.format("%Y-%m-%d").to_string(),
        ]);
    }
    println!("{table}");
    print_footer(page);
}
