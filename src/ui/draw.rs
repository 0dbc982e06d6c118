use anyhow::Result;
use ratatui::backend::Backend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::line::NORMAL as LINE;
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Axis, Block, Borders, Chart, Clear, Dataset, GraphType, List, ListItem, ListState, Paragraph,
    Wrap,
};
use ratatui::{Frame, Terminal};

use crate::config::RgbColor;
use crate::draft::{ProfileDraft, ProfileField};
use crate::render::{country_label, format_count, format_date, format_timestamp, tags_label};
use crate::search::SearchStatus;
use crate::selection::DetailView;
use crate::trends::{Metric, Series};

use super::app::{App, Focus};
use super::picker::{Picker, PickerTarget};

const SEARCH_HELP_INPUT: &str = "Type to search  Enter/Esc: back to list";
const EDITOR_HELP: &str = "j/k: field  Enter: edit  s: save  Esc: discard";
const FIELD_INPUT_HELP: &str = "Enter: apply  Esc: cancel";
const COUNTRY_PICKER_HELP: &str = "Type to filter  Up/Down: move  Enter: choose  F8: none  Esc: close";
const TAG_PICKER_HELP: &str = "Up/Down: move  Space: toggle  F8: clear  Enter/Esc: close";
const HELP_MODAL_FOOTER: &str = "j/k: scroll  Esc/q: close";
const CHART_HEIGHT: u16 = 10;

pub fn render<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    terminal.draw(|frame| draw_frame(frame, app))?;
    Ok(())
}

fn draw_frame(frame: &mut Frame<'_>, app: &mut App) {
    let size = frame.area();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(size);

    draw_header(frame, layout[0], app);
    draw_body(frame, layout[1], app);
    draw_footer(frame, layout[2], app);
    draw_picker_modal(frame, size, app);
    draw_help_modal(frame, size, app);
}

fn draw_header(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let header_style = header_text_style(app);
    let snapshot = app.search.snapshot();
    let filter = app.filter.filter();

    let query = app.filter.query();
    let mut spans = vec![Span::styled(
        if query.is_empty() {
            "ARTDESK://".to_string()
        } else {
            format!("ARTDESK://?{}", query)
        },
        header_style,
    )];
    spans.push(Span::raw("   "));
    spans.push(Span::styled(format!("PAGE {}", filter.page), header_style));
    if snapshot.is_loading() {
        spans.push(Span::raw("   "));
        spans.push(Span::styled("LOADING", accent_style(app)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_body(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let width = app.list_width().min(area.width);
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(width), Constraint::Min(0)])
        .split(area);
    draw_directory(frame, chunks[0], app);
    draw_detail(frame, chunks[1], app);
}

fn draw_directory(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(app));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Min(0),
        ])
        .split(inner);

    draw_search_input(frame, layout[0], app);
    let summary = Line::from(Span::styled(filter_summary(app), header_text_style(app)));
    render_header_with_separator(frame, layout[1], summary, app, area.width);
    draw_directory_list(frame, layout[2], app);
}

fn draw_search_input(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let active = app.focus == Focus::SearchInput;
    let label = "SEARCH: ";
    let value_style = if active {
        selection_style(app)
    } else {
        Style::default()
    };
    let line = Line::from(vec![
        Span::styled(label, header_text_style(app)),
        Span::styled(app.search_input.value().to_string(), value_style),
    ]);
    frame.render_widget(Paragraph::new(line), area);

    if active && !app.field_input.active && app.picker.is_none() && app.help_modal.is_none() {
        let column = Span::raw(label).width() + app.search_input.visual_cursor();
        frame.set_cursor_position((area.x.saturating_add(column as u16), area.y));
    }
}

fn filter_summary(app: &App) -> String {
    let filter = app.filter.filter();
    let country = if filter.country.is_none() {
        "any country".to_string()
    } else {
        filter.country.title.clone()
    };
    let tags: Vec<&str> = filter
        .tags
        .iter()
        .map(|slug| app.catalog().display_of(slug.as_str()).unwrap_or(slug.as_str()))
        .collect();
    if tags.is_empty() {
        format!("{} | all tags", country)
    } else {
        format!("{} | {}", country, tags.join(", "))
    }
}

fn draw_directory_list(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let snapshot = app.search.snapshot();
    let placeholder = match &snapshot.status {
        SearchStatus::Idle => Some("No search issued".to_string()),
        SearchStatus::Loading => Some("Loading...".to_string()),
        SearchStatus::Failed(message) => Some(format!("Search failed: {}", message)),
        SearchStatus::Ready if snapshot.items.is_empty() => Some("No artists found".to_string()),
        SearchStatus::Ready => None,
    };
    if let Some(text) = placeholder {
        frame.render_widget(
            Paragraph::new(text).wrap(Wrap { trim: true }),
            area,
        );
        return;
    }

    let open_id = app.selection.selected_id();
    let mut items: Vec<ListItem> = snapshot
        .items
        .iter()
        .map(|profile| {
            let marker = if open_id.as_deref() == Some(profile.user_id.as_str()) {
                "*"
            } else {
                " "
            };
            let country = profile
                .country
                .as_deref()
                .filter(|code| !code.is_empty())
                .map(str::to_ascii_uppercase)
                .unwrap_or_else(|| "--".to_string());
            ListItem::new(Line::from(format!(
                "{}{} @{}",
                marker, country, profile.username
            )))
        })
        .collect();
    if snapshot.has_next {
        items.push(ListItem::new(Line::from(Span::styled(
            " more: next page",
            header_text_style(app),
        ))));
    }

    let mut state = ListState::default();
    if app.focus == Focus::List {
        state.select(Some(app.list_index));
    }

    let list = List::new(items)
        .highlight_style(selection_style(app))
        .highlight_symbol(" ")
        .repeat_highlight_symbol(false);

    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_detail(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let view = app.selection.view();
    if view.profile().is_none() {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style(app));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        render_centered_words(frame, inner, "Select an artist");
        return;
    }

    let chart_height = CHART_HEIGHT.min(area.height / 2);
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(chart_height)])
        .split(area);

    draw_profile_card(frame, layout[0], app, &view);
    if chart_height > 0 {
        draw_trends(frame, layout[1], app, &view);
    }
}

fn draw_profile_card(frame: &mut Frame<'_>, area: Rect, app: &App, view: &DetailView) {
    let Some(profile) = view.profile() else {
        return;
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(app));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(inner);

    let editing = app.is_editing();
    let snapshot = app.editor.as_ref().map(|editor| editor.snapshot());
    let mut title = vec![Span::styled(
        profile.display_name().to_uppercase(),
        header_text_style(app),
    )];
    if let Some(snapshot) = &snapshot {
        if snapshot.saving {
            title.push(Span::styled("  SAVING", accent_style(app)));
        } else if editing {
            title.push(Span::styled("  EDITING", accent_style(app)));
        }
    }
    render_header_with_separator(frame, layout[0], Line::from(title), app, area.width);

    let fields = app
        .editor
        .as_ref()
        .map(|editor| editor.view())
        .unwrap_or_else(|| ProfileDraft::from_profile(profile));
    let label_width = ProfileField::ALL
        .iter()
        .map(|field| field.label().len() + 1)
        .chain(std::iter::once("Followers:".len()))
        .max()
        .unwrap_or(0);

    let mut lines: Vec<Line> = Vec::new();
    let mut cursor = None;
    for field in ProfileField::ALL {
        let highlight = editing && field == app.focused_field();
        let changed = snapshot
            .as_ref()
            .map(|snapshot| snapshot.changed.contains(&field))
            .unwrap_or(false);
        let reason = snapshot
            .as_ref()
            .and_then(|snapshot| snapshot.rejection.as_ref())
            .and_then(|rejection| rejection.reason(field))
            .map(str::to_string);
        let line_index = lines.len();
        let (line, cursor_column) =
            field_line(app, &fields, field, highlight, changed, label_width);
        if let Some(column) = cursor_column {
            cursor = Some((line_index, column));
        }
        lines.push(line);
        if let Some(reason) = reason {
            lines.push(Line::from(Span::styled(
                format!("{:width$} ! {}", "", reason, width = label_width),
                accent_style(app),
            )));
        }
    }

    if let Some(rejection) = snapshot.as_ref().and_then(|s| s.rejection.as_ref()) {
        lines.push(Line::from(Span::styled(
            format!("Rejected: {}", rejection.message),
            accent_style(app),
        )));
    }

    lines.push(Line::from(""));
    let stats = [
        ("Followers:", format_count(profile.followers_count)),
        ("Tweets:", format_count(profile.tweets_count)),
        ("Joined:", format_date(profile.joined_at)),
        ("Updated:", format_timestamp(profile.last_updated_at)),
        ("Profile:", profile.profile_url()),
    ];
    for (label, value) in stats {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:width$} ", label, width = label_width),
                header_text_style(app),
            ),
            Span::raw(value),
        ]));
    }

    frame.render_widget(Paragraph::new(lines), layout[1]);

    if let Some((line_idx, column)) = cursor {
        let x = layout[1].x.saturating_add(column as u16);
        let y = layout[1].y.saturating_add(line_idx as u16);
        frame.set_cursor_position((x, y));
    }
}

fn field_line(
    app: &App,
    fields: &ProfileDraft,
    field: ProfileField,
    highlight: bool,
    changed: bool,
    label_width: usize,
) -> (Line<'static>, Option<usize>) {
    let typing = app.field_input.active && app.field_input.target() == Some(field);
    let (label_style, mut value_style) = line_styles(app, highlight || typing);
    if changed && !highlight {
        value_style = value_style.add_modifier(Modifier::BOLD);
    }

    let label = format!(
        "{:width$} ",
        format!("{}:", field.label()),
        width = label_width
    );
    let mut spans = vec![Span::styled(label.clone(), label_style)];
    let mut cursor = None;

    if typing {
        cursor = Some(Span::raw(&label).width() + app.field_input.visual_cursor());
        spans.push(Span::styled(app.field_input.value().to_string(), value_style));
    } else {
        let catalog = app.catalog();
        let value = match field {
            ProfileField::Country => country_label(catalog, &fields.country),
            ProfileField::Tags => tags_label(catalog, &fields.tags),
            other => {
                let text = fields.value(other).to_string();
                if text.is_empty() {
                    "-".to_string()
                } else {
                    text
                }
            }
        };
        spans.push(Span::styled(value, value_style));
        if changed {
            spans.push(Span::styled(" *", accent_style(app)));
        }
    }

    (Line::from(spans), cursor)
}

fn draw_trends(frame: &mut Frame<'_>, area: Rect, app: &App, view: &DetailView) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    for (metric, chunk) in Metric::ALL.into_iter().zip(chunks.iter()) {
        draw_trend_chart(frame, *chunk, app, view, metric);
    }
}

fn draw_trend_chart(
    frame: &mut Frame<'_>,
    area: Rect,
    app: &App,
    view: &DetailView,
    metric: Metric,
) {
    let title = Line::from(Span::styled(
        format!(" {} ", metric.label().to_uppercase()),
        header_text_style(app),
    ));
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(app))
        .title(title);

    let series = Series::from_detail(view, metric);
    let message = match (&series, view) {
        (_, DetailView::Failed { error, .. }) => Some(format!("Trends unavailable: {}", error)),
        (Series::Loading, _) => Some("Loading...".to_string()),
        (Series::Empty, _) => Some("No data".to_string()),
        (Series::Points(_), _) => None,
    };
    if let Some(message) = message {
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(
            Paragraph::new(message)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            inner,
        );
        return;
    }

    let data = series.chart_data();
    let Some((min, max)) = series.bounds() else {
        return;
    };
    // a flat series still needs a non-empty y range
    let (low, high) = if min == max {
        (min.saturating_sub(1) as f64, max.saturating_add(1) as f64)
    } else {
        (min as f64, max as f64)
    };
    let last_x = data.len().saturating_sub(1).max(1) as f64;

    let first_label = series
        .points()
        .first()
        .map(|point| format_date(point.timestamp))
        .unwrap_or_default();
    let last_label = series
        .points()
        .last()
        .map(|point| format_date(point.timestamp))
        .unwrap_or_default();

    let dataset = Dataset::default()
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(accent_style(app))
        .data(&data);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .style(header_text_style(app))
                .bounds([0.0, last_x])
                .labels(vec![Span::raw(first_label), Span::raw(last_label)]),
        )
        .y_axis(
            Axis::default()
                .style(header_text_style(app))
                .bounds([low, high])
                .labels(vec![
                    Span::raw(format_count(low as u64)),
                    Span::raw(format_count(high as u64)),
                ]),
        );

    frame.render_widget(chart, area);
}

fn draw_footer(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let message: String = if let Some(picker) = &app.picker {
        match picker {
            Picker::Country(_) => COUNTRY_PICKER_HELP.to_string(),
            Picker::Tags(_) => TAG_PICKER_HELP.to_string(),
        }
    } else if app.field_input.active {
        FIELD_INPUT_HELP.to_string()
    } else if let Some(status) = &app.status {
        status.clone()
    } else if app.is_editing() {
        EDITOR_HELP.to_string()
    } else if app.focus == Focus::SearchInput {
        SEARCH_HELP_INPUT.to_string()
    } else {
        format!("READY  history: {}  F1: help", app.history_position())
    };
    let colors = app.ui_colors();
    let style = Style::default()
        .fg(color(colors.status_fg))
        .bg(color(colors.status_bg));

    let background = Block::default().style(Style::default().bg(color(colors.status_bg)));
    frame.render_widget(background, area);

    frame.render_widget(Paragraph::new(message).style(style), area);
}

fn draw_picker_modal(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let Some(picker) = &app.picker else {
        return;
    };

    let width = area.width.saturating_div(2).max(36).min(area.width);
    let height = area.height.saturating_mul(3).saturating_div(5).max(8).min(area.height);
    let modal_area = centered(area, width, height);
    frame.render_widget(Clear, modal_area);

    let title = Line::from(Span::styled(
        format!(" {} ", picker.title()),
        header_text_style(app),
    ));
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(app))
        .title(title)
        .title_alignment(Alignment::Center);
    let inner = block.inner(modal_area);
    frame.render_widget(block, modal_area);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let catalog = app.catalog();
    match picker {
        Picker::Country(country) => {
            let layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(2), Constraint::Min(0)])
                .split(inner);

            let label = "FILTER: ";
            let line = Line::from(vec![
                Span::styled(label, header_text_style(app)),
                Span::raw(country.query().to_string()),
            ]);
            render_header_with_separator(frame, layout[0], line, app, modal_area.width);

            let items: Vec<ListItem> = country
                .matches(catalog)
                .into_iter()
                .map(|entry| ListItem::new(format!("{} ({})", entry.title, entry.value)))
                .collect();
            let mut state = ListState::default();
            if !items.is_empty() {
                state.select(Some(country.selected()));
            }
            let list = List::new(items)
                .highlight_style(selection_style(app))
                .highlight_symbol(" ")
                .repeat_highlight_symbol(false);
            frame.render_stateful_widget(list, layout[1], &mut state);

            let column = Span::raw(label).width() + country.visual_cursor();
            frame.set_cursor_position((layout[0].x.saturating_add(column as u16), layout[0].y));
        }
        Picker::Tags(tags) => {
            let active: Vec<String> = match tags.target {
                PickerTarget::Filter => app
                    .filter
                    .filter()
                    .tags
                    .iter()
                    .map(|slug| slug.as_str().to_string())
                    .collect(),
                PickerTarget::Draft => app
                    .editor
                    .as_ref()
                    .map(|editor| editor.view().tags)
                    .unwrap_or_default(),
            };
            let items: Vec<ListItem> = catalog
                .canonical_tags()
                .iter()
                .map(|tag| {
                    let on = catalog
                        .resolve_tag(tag)
                        .map(|slug| active.iter().any(|have| have == slug.as_str()))
                        .unwrap_or(false);
                    let mark = if on { "[x]" } else { "[ ]" };
                    ListItem::new(format!("{} {}", mark, tag))
                })
                .collect();
            let mut state = ListState::default();
            state.select(Some(tags.selected()));
            let list = List::new(items)
                .highlight_style(selection_style(app))
                .highlight_symbol(" ")
                .repeat_highlight_symbol(false);
            frame.render_stateful_widget(list, inner, &mut state);
        }
    }
}

fn draw_help_modal(frame: &mut Frame<'_>, area: Rect, app: &mut App) {
    if app.help_modal.is_none() {
        return;
    }

    // 2/3 width, 80% height
    let width = area.width.saturating_mul(2).saturating_div(3).max(40).min(area.width);
    let height = area.height.saturating_mul(4).saturating_div(5).max(10).min(area.height);
    let modal_area = centered(area, width, height);

    frame.render_widget(Clear, modal_area);

    let header_style = header_text_style(app);
    let border_s = border_style(app);

    let sections = app.help_entries();
    let mut lines: Vec<Line> = Vec::new();

    let content_width = width.saturating_sub(4) as usize;
    let action_width = 20usize;

    for (section_idx, section) in sections.iter().enumerate() {
        let header_text = format!(" {} ", section.title);
        let padding_total = content_width.saturating_sub(header_text.len());
        let left_pad = padding_total / 2;
        let right_pad = padding_total - left_pad;
        let header_line = format!(
            "{}{}{}",
            LINE.horizontal.repeat(left_pad),
            header_text,
            LINE.horizontal.repeat(right_pad)
        );
        lines.push(Line::from(Span::styled(header_line, header_style)));

        for entry in &section.entries {
            let action = format!("{:<width$}", entry.action, width = action_width);
            lines.push(Line::from(vec![
                Span::styled(action, Style::default()),
                Span::styled(entry.keys.clone(), header_style),
            ]));
        }

        if section_idx < sections.len() - 1 {
            lines.push(Line::from(""));
        }
    }

    // borders (2) + footer line (1)
    let inner_height = height.saturating_sub(3) as usize;
    let total_lines = lines.len();

    let Some(modal) = app.help_modal.as_mut() else {
        return;
    };
    modal.total_lines = total_lines;
    modal.viewport_height = inner_height;

    let max_scroll = modal.total_lines.saturating_sub(modal.viewport_height);
    if modal.scroll > max_scroll {
        modal.scroll = max_scroll;
    }

    let scroll = modal.scroll;
    let viewport_height = modal.viewport_height;
    let scroll_indicator = match (modal.can_scroll_up(), modal.can_scroll_down()) {
        (true, true) => "▲▼",
        (true, false) => "▲ ",
        (false, true) => " ▼",
        (false, false) => "  ",
    };

    let visible_lines: Vec<Line> = lines
        .into_iter()
        .skip(scroll)
        .take(viewport_height)
        .collect();

    let title = Line::from(vec![
        Span::styled(" HELP ", header_style),
        Span::styled(scroll_indicator, header_style),
    ]);
    let footer = Line::from(Span::styled(
        format!(" {} ", HELP_MODAL_FOOTER),
        header_style,
    ));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_s)
        .title(title)
        .title_bottom(footer)
        .title_alignment(Alignment::Center);

    let inner = block.inner(modal_area);
    frame.render_widget(block, modal_area);
    frame.render_widget(Paragraph::new(visible_lines), inner);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

fn line_styles(app: &App, highlight: bool) -> (Style, Style) {
    if highlight {
        let style = selection_style(app);
        (style, style)
    } else {
        (header_text_style(app), Style::default())
    }
}

fn selection_style(app: &App) -> Style {
    let colors = app.ui_colors();
    Style::default()
        .fg(color(colors.selection_fg))
        .bg(color(colors.selection_bg))
}

fn border_style(app: &App) -> Style {
    Style::default().fg(color(app.ui_colors().border))
}

fn header_text_style(app: &App) -> Style {
    Style::default().fg(color(app.ui_colors().border))
}

fn accent_style(app: &App) -> Style {
    Style::default().fg(color(app.ui_colors().accent))
}

fn render_centered_words(frame: &mut Frame<'_>, area: Rect, text: &str) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let mut lines: Vec<Line> = text
        .split_whitespace()
        .map(|word| Line::from(word.to_string()))
        .collect();

    if lines.is_empty() {
        return;
    }

    if lines.len() as u16 > area.height {
        lines.truncate(area.height as usize);
    }

    let height = lines.len() as u16;
    let start_y = area.y + (area.height.saturating_sub(height)) / 2;
    let target = Rect {
        x: area.x,
        y: start_y,
        width: area.width,
        height,
    };

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), target);
}

/// Render a header line with a separator below it.
/// `outer_width` is the full pane width (including borders) for drawing connected separators.
fn render_header_with_separator(
    frame: &mut Frame<'_>,
    area: Rect,
    content: Line<'_>,
    app: &App,
    outer_width: u16,
) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    if area.height == 1 {
        frame.render_widget(Paragraph::new(content), area);
        return;
    }

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    frame.render_widget(Paragraph::new(content), layout[0]);

    // ├───┤ spanning the outer width so it joins the side borders
    let inner_width = outer_width.saturating_sub(2) as usize;
    let separator = format!(
        "{}{}{}",
        LINE.vertical_right,
        LINE.horizontal.repeat(inner_width),
        LINE.vertical_left
    );
    let separator_line = Line::from(Span::styled(separator, border_style(app)));

    let separator_area = Rect {
        x: layout[1].x.saturating_sub(1),
        y: layout[1].y,
        width: outer_width,
        height: 1,
    };
    frame.render_widget(Paragraph::new(separator_line), separator_area);
}

fn color(rgb: RgbColor) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}
