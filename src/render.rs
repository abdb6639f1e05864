// src/render.rs

//! Terminal and JSON renderers for a `DashboardView`.

use std::io::{self, Write};

use crate::{
    aggregate::{Bar, Dimension, LanguageViews},
    dashboard::DashboardView,
    predict::PredictionRanking,
};

const BAR_WIDTH: usize = 40;

pub fn json<W: Write>(view: &DashboardView, out: &mut W) -> serde_json::Result<()> {
    serde_json::to_writer_pretty(&mut *out, view)?;
    writeln!(out).map_err(serde_json::Error::io)
}

pub fn text<W: Write>(view: &DashboardView, out: &mut W) -> io::Result<()> {
    let k = &view.kpis;
    writeln!(out, "IMovie Dashboard")?;
    writeln!(
        out,
        "Filter: year {} | categories [{}] | languages [{}] | {} rows",
        view.filter.year,
        join(&view.filter.categories),
        join(&view.filter.languages),
        view.matched_rows
    )?;
    writeln!(out)?;

    writeln!(out, "Total Views:           {}", thousands(k.total_views))?;
    writeln!(
        out,
        "Average Viewer Rate:   {}",
        k.avg_rating.map_or("n/a".to_string(), |r| format!("{r:.2}"))
    )?;
    writeln!(
        out,
        "Most Popular Category: {}",
        k.top_category.as_deref().unwrap_or("n/a")
    )?;
    writeln!(
        out,
        "Top Language:          {}",
        k.top_language.as_deref().unwrap_or("n/a")
    )?;

    section(out, "Views by Category")?;
    bars(out, &view.category_views, 0)?;

    section(out, "Average Viewer Rate by Category")?;
    bars(out, &view.category_ratings, 2)?;

    section(out, "Views by Language")?;
    match &view.language_views {
        LanguageViews::Data(b) => bars(out, b, 0)?,
        LanguageViews::NoData => writeln!(out, "No data available for selected filters.")?,
    }

    section(out, "Top Films by Popularity Score")?;
    bars(out, &view.top_films, 1)?;

    prediction(out, &view.predictions.category)?;
    prediction(out, &view.predictions.language)?;
    writeln!(out)?;
    writeln!(out, "Method: {}", view.predictions.category.method)?;
    Ok(())
}

fn prediction<W: Write>(out: &mut W, ranking: &PredictionRanking) -> io::Result<()> {
    let title = match ranking.target_year {
        Some(year) => format!("Predicted Best-Performing {} in {year}", plural(ranking)),
        None => format!("Predicted Best-Performing {}", plural(ranking)),
    };
    section(out, &title)?;
    bars(out, &ranking.entries, 1)
}

fn plural(ranking: &PredictionRanking) -> &'static str {
    match ranking.dimension {
        Dimension::Category => "Categories",
        Dimension::Language => "Languages",
        Dimension::FilmName => "Films",
        Dimension::Year => "Years",
    }
}

fn section<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{title}")?;
    writeln!(out, "{}", "-".repeat(title.chars().count()))
}

fn bars<W: Write>(out: &mut W, items: &[Bar], decimals: usize) -> io::Result<()> {
    if items.is_empty() {
        return writeln!(out, "(empty)");
    }
    let label_width = items.iter().map(|b| b.label.chars().count()).max().unwrap_or(0);
    let max = items.iter().map(|b| b.value).fold(0.0_f64, f64::max);

    for b in items {
        let len = if max > 0.0 {
            ((b.value / max) * BAR_WIDTH as f64).round() as usize
        } else {
            0
        };
        writeln!(
            out,
            "{:<label_width$}  {:>14.decimals$}  {}",
            b.label,
            b.value,
            "#".repeat(len)
        )?;
    }
    Ok(())
}

fn join(values: &std::collections::BTreeSet<String>) -> String {
    values.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}

/// `1234567` → `"1,234,567"`.
pub fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
