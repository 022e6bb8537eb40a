#![forbid(unsafe_code)]

//! Project records and their card markup.

use std::fmt::Write as _;

use serde::Serialize;

/// One showcased project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Project {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

impl Project {
    /// Comma-joined lowercase technology list stored on the card for matching.
    #[must_use]
    pub fn technology_key(&self) -> String {
        self.technologies.join(",").to_lowercase()
    }
}

/// Fixed, ordered project list. Built once and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ProjectCatalog {
    projects: Vec<Project>,
}

impl ProjectCatalog {
    #[must_use]
    pub fn new(projects: Vec<Project>) -> Self {
        Self { projects }
    }

    #[must_use]
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.projects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Distinct technology tags in first-seen order, original casing.
    #[must_use]
    pub fn technology_filters(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for tech in self.projects.iter().flat_map(|p| p.technologies.iter()) {
            if !seen.contains(&tech.as_str()) {
                seen.push(tech);
            }
        }
        seen
    }
}

fn project(
    id: u32,
    title: &str,
    description: &str,
    technologies: &[&str],
    image: &str,
) -> Project {
    Project {
        id,
        title: title.to_owned(),
        description: description.to_owned(),
        technologies: technologies.iter().map(|t| (*t).to_owned()).collect(),
        image: image.to_owned(),
        demo_url: Some("#".to_owned()),
        source_url: Some("#".to_owned()),
    }
}

impl Default for ProjectCatalog {
    fn default() -> Self {
        Self::new(vec![
            project(
                1,
                "E-Commerce Platform",
                "A full-stack e-commerce solution built with TypeScript, React, and Node.js",
                &["TypeScript", "React", "Node.js", "MongoDB"],
                "https://via.placeholder.com/300x200/4f46e5/ffffff?text=E-Commerce",
            ),
            project(
                2,
                "Task Management App",
                "A collaborative task management application with real-time updates",
                &["TypeScript", "Vue.js", "Socket.io", "PostgreSQL"],
                "https://via.placeholder.com/300x200/059669/ffffff?text=Task+Manager",
            ),
            project(
                3,
                "Weather Dashboard",
                "Interactive weather dashboard with data visualization and forecasting",
                &["TypeScript", "D3.js", "Express", "Weather API"],
                "https://via.placeholder.com/300x200/dc2626/ffffff?text=Weather+App",
            ),
        ])
    }
}

fn esc(value: &str) -> String {
    v_htmlescape::escape(value).to_string()
}

/// Markup for a single card.
#[must_use]
pub fn render_project_card(project: &Project) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        "<div class=\"project-card\" data-project-id=\"{}\" data-technologies=\"{}\">",
        project.id,
        esc(&project.technology_key())
    );
    html.push_str("<div class=\"project-image\">");
    let _ = write!(
        html,
        "<img src=\"{}\" alt=\"{}\" loading=\"lazy\">",
        esc(&project.image),
        esc(&project.title)
    );
    html.push_str("<div class=\"project-overlay\"><div class=\"project-links\">");
    for (url, label) in [(&project.demo_url, "Demo"), (&project.source_url, "Code")] {
        if let Some(url) = url {
            let _ = write!(
                html,
                "<a href=\"{}\" class=\"project-link\" target=\"_blank\">{label}</a>",
                esc(url)
            );
        }
    }
    html.push_str("</div></div></div>");
    html.push_str("<div class=\"project-content\">");
    let _ = write!(
        html,
        "<h3 class=\"project-title\">{}</h3>",
        esc(&project.title)
    );
    let _ = write!(
        html,
        "<p class=\"project-description\">{}</p>",
        esc(&project.description)
    );
    html.push_str("<div class=\"project-technologies\">");
    for tech in &project.technologies {
        let _ = write!(html, "<span class=\"tech-tag\">{}</span>", esc(tech));
    }
    html.push_str("</div></div></div>");
    html
}

/// Markup for the whole grid, one card per project in catalog order.
#[must_use]
pub fn render_project_grid(projects: &[Project]) -> String {
    projects.iter().map(render_project_card).collect()
}
