//! Server-rendered markup for the waiting-list page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Two panels: the submission form (quick-add plus the full request form) and
//! the results table. Every action is a plain form post so the page works
//! without client-side scripting; the HTTP layer re-renders after each post.

use std::collections::HashMap;

use leptos::prelude::*;
use leptos::reactive::owner::Owner;

use super::PageView;
use super::form::RequestForm;
use super::notify::Toast;
use crate::backend::types::normalize_skill_name;
use crate::backend::{Category, WaitingListEntry};

pub const EMPTY_MESSAGE: &str = "No skills are currently in the waiting list";
pub const TABLE_COLUMNS: usize = 5;

/// One table row, derived from a cached entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRow {
    pub id: String,
    pub skill: String,
    pub category: String,
    /// ISO date portion of the creation timestamp.
    pub requested_on: String,
    /// Entries in the cache sharing this skill name.
    pub waiting: usize,
}

/// Build table rows in cache order. The waiting count aggregates entries
/// whose trimmed, lowercased skill names match.
#[must_use]
pub fn entry_rows(entries: &[WaitingListEntry]) -> Vec<EntryRow> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for entry in entries {
        *counts.entry(normalize_skill_name(&entry.desired_skill)).or_default() += 1;
    }
    entries
        .iter()
        .map(|entry| EntryRow {
            id: entry.id.clone(),
            skill: entry.desired_skill.clone(),
            category: entry.category_label().to_owned(),
            requested_on: entry.requested_on().to_string(),
            waiting: counts
                .get(&normalize_skill_name(&entry.desired_skill))
                .copied()
                .unwrap_or(1),
        })
        .collect()
}

fn teach_action(entry_id: &str) -> String {
    format!("/waiting-list/{entry_id}/teach")
}

/// Render the full page document.
#[must_use]
pub fn render_page(page: PageView, toasts: Vec<Toast>) -> String {
    Owner::new().with(|| view! { <WaitingListDocument page toasts/> }.to_html())
}

#[component]
fn WaitingListDocument(page: PageView, toasts: Vec<Toast>) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <title>"Skill Waiting List"</title>
            </head>
            <body>
                <main class="waiting-list-page">
                    <ToastRegion toasts/>
                    <h1 class="waiting-list-page__title">"Skill Waiting List"</h1>
                    <div class="waiting-list-page__panels">
                        <section class="panel">
                            <h2 class="panel__title">"Request a Skill"</h2>
                            <SubmissionForm
                                quick_add=page.quick_add
                                form=page.form
                                loading=page.loading
                                signed_in=page.signed_in
                            />
                        </section>
                        <section class="panel">
                            <h2 class="panel__title">"Current Waiting List"</h2>
                            <WaitingListTable rows=page.rows loading=page.loading/>
                        </section>
                    </div>
                </main>
            </body>
        </html>
    }
}

/// Transient notifications produced while handling the request.
#[component]
pub fn ToastRegion(toasts: Vec<Toast>) -> impl IntoView {
    view! {
        <div class="toast-region" role="status">
            {toasts
                .into_iter()
                .map(|toast| {
                    let class = format!("toast toast--{}", toast.variant.as_str());
                    view! {
                        <div class=class>
                            <strong class="toast__title">{toast.title}</strong>
                            <p class="toast__description">{toast.description}</p>
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}

/// Quick-add field plus the full request form.
#[component]
pub fn SubmissionForm(quick_add: String, form: RequestForm, loading: bool, signed_in: bool) -> impl IntoView {
    let selected_category = form.category.clone();
    view! {
        <div class="submission-form">
            {(!signed_in)
                .then(|| {
                    view! {
                        <p class="submission-form__hint">"Sign in to add skills to the waiting list."</p>
                    }
                })}
            <form class="submission-form__quick" method="post" action="/waiting-list/quick-add">
                <input
                    class="input"
                    type="text"
                    name="new_skill"
                    placeholder="What skill would you like to learn?"
                    value=quick_add
                />
                <button class="btn" type="submit" disabled=loading>
                    "Add"
                </button>
            </form>
            <form class="submission-form__full" method="post" action="/waiting-list/requests">
                <label class="submission-form__label">
                    "Skill name"
                    <input class="input" type="text" name="skill_name" value=form.skill_name/>
                </label>
                <label class="submission-form__label">
                    "Category"
                    <select class="input" name="category">
                        <option value="" selected=selected_category.is_empty()>
                            "Select a category"
                        </option>
                        {Category::ALL
                            .into_iter()
                            .map(|category| {
                                let label = category.label();
                                let selected = selected_category == label;
                                view! {
                                    <option value=label selected=selected>
                                        {label}
                                    </option>
                                }
                            })
                            .collect_view()}
                    </select>
                </label>
                <label class="submission-form__label">
                    "Description"
                    <textarea class="input" name="description">
                        {form.description}
                    </textarea>
                </label>
                <label class="submission-form__checkbox">
                    <input type="checkbox" name="notify" value="on" checked=form.notify/>
                    "Notify me when someone can teach this skill"
                </label>
                <button class="btn btn--primary" type="submit" disabled=loading>
                    "Submit Request"
                </button>
            </form>
        </div>
    }
}

/// Results table with one teach action per entry.
#[component]
pub fn WaitingListTable(rows: Vec<EntryRow>, loading: bool) -> impl IntoView {
    let body = if rows.is_empty() {
        view! {
            <tr class="waiting-list__empty">
                <td colspan=TABLE_COLUMNS.to_string()>{EMPTY_MESSAGE}</td>
            </tr>
        }
            .into_any()
    } else {
        rows.into_iter()
            .map(|row| {
                let action = teach_action(&row.id);
                view! {
                    <tr class="waiting-list__row">
                        <td class="waiting-list__skill">{row.skill}</td>
                        <td>
                            <span class="badge">{row.category}</span>
                        </td>
                        <td>{row.requested_on}</td>
                        <td>
                            <span class="badge badge--count">{row.waiting}</span>
                        </td>
                        <td>
                            <form method="post" action=action>
                                <button class="btn btn--small" type="submit" disabled=loading>
                                    "I can teach this"
                                </button>
                            </form>
                        </td>
                    </tr>
                }
            })
            .collect_view()
            .into_any()
    };

    view! {
        <table class="waiting-list__table">
            <thead>
                <tr>
                    <th>"Skill"</th>
                    <th>"Category"</th>
                    <th>"Requested"</th>
                    <th>"Waiting"</th>
                    <th>"Action"</th>
                </tr>
            </thead>
            <tbody>{body}</tbody>
        </table>
    }
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
