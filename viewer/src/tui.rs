use crate::app::App;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Circle, Context, Points},
        Block, Borders, Clear, Paragraph,
    },
    Frame,
};
use shared::Gene;
use sim::{Bounds, World};

const SIDEBAR_WIDTH: u16 = 26;

pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(SIDEBAR_WIDTH)])
        .split(frame.size());

    draw_map(frame, columns[0], app.world());
    draw_stats(frame, columns[1], app.world());

    if app.is_paused() {
        draw_paused(frame, columns[0]);
    }
}

fn draw_map(frame: &mut Frame<'_>, area: Rect, world: &World) {
    let bounds = world.bounds();

    let canvas = Canvas::default()
        .block(Block::default().borders(Borders::ALL).title("World"))
        .marker(Marker::Braille)
        .x_bounds([0.0, bounds.width])
        .y_bounds([0.0, bounds.height])
        .paint(|ctx| {
            for food in world.food() {
                disc(ctx, bounds, (food.x, food.y), food.radius(), rgb(food.color()), None);
            }
            for agent in world.prey().iter().chain(world.predators()) {
                let outline = agent.outline().map(rgb);
                disc(ctx, bounds, (agent.x(), agent.y()), agent.radius(), rgb(agent.color()), outline);
            }
        });

    frame.render_widget(canvas, area);
}

/// Paint a filled disc as concentric rings, optionally with a differently
/// colored outermost ring
fn disc(
    ctx: &mut Context<'_>,
    bounds: Bounds,
    (x, y): (f64, f64),
    radius: u32,
    fill: Color,
    outline: Option<Color>,
) {
    // Screen rows grow downward, canvas rows upward
    let y = bounds.height - y;

    ctx.draw(&Points {
        coords: &[(x, y)],
        color: fill,
    });
    for r in 1..=radius {
        let color = match outline {
            Some(outline) if r == radius => outline,
            _ => fill,
        };
        ctx.draw(&Circle {
            x,
            y,
            radius: f64::from(r),
            color,
        });
    }
}

fn draw_stats(frame: &mut Frame<'_>, area: Rect, world: &World) {
    let stats = world.stats();

    let mut lines = vec![
        stat_line("Prey", stats.prey),
        stat_line("Predators", stats.predators),
        stat_line("Food", stats.food),
        stat_line("Generation", stats.generation),
        stat_line("Max Prey", stats.max_prey),
        stat_line("Max Predators", stats.max_predators),
    ];

    if let Some(traits) = stats.prey_traits {
        lines.push(Line::from(""));
        for gene in Gene::ALL {
            lines.push(Line::from(format!("Avg {gene}: {:.2}", traits.get(gene))));
        }
    }

    let hint = Style::default().fg(Color::DarkGray);
    lines.push(Line::from(""));
    lines.push(Line::styled("Space  pause", hint));
    lines.push(Line::styled("R      reset", hint));
    lines.push(Line::styled("Q      quit", hint));

    let panel = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Stats"));
    frame.render_widget(panel, area);
}

fn stat_line(label: &'static str, value: impl ToString) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{label}: "),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(value.to_string()),
    ])
}

fn draw_paused(frame: &mut Frame<'_>, area: Rect) {
    let banner = centered(area, 12, 3);
    let paused = Paragraph::new("PAUSED")
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(Clear, banner);
    frame.render_widget(paused, banner);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn rgb(color: shared::Color) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{backend::TestBackend, Terminal};
    use sim::WorldConfig;

    fn render(app: &App) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();

        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn app() -> App {
        App::new(World::with_seed(WorldConfig::default(), 4).unwrap())
    }

    #[test]
    fn test_renders_stats() {
        let mut app = app();
        app.update();
        let screen = render(&app);

        // Nothing starves, ages out or breeds on the first tick
        assert!(screen.contains("Predators: 5"));
        assert!(screen.contains("Generation: 1"));
        assert!(screen.contains("Max Predators:"));
        assert!(screen.contains("Avg Speed:"));
        assert!(screen.contains("Avg Camouflage:"));
        assert!(!screen.contains("PAUSED"));
    }

    #[test]
    fn test_renders_pause_banner() {
        let mut app = app();
        app.handle_key(KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE));

        assert!(render(&app).contains("PAUSED"));
    }
}
