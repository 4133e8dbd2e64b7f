//! Promotional screen demo.
//!
//! Wires every component into one terminal screen and drives the timer
//! service from real elapsed time. Keys:
//!
//! - `1`-`4` select a showcase tab
//! - `n`     jump the carousel to the next image
//! - `e`     simulate a natural end on the active video
//! - `h`     cycle the map hover (off at the end of the list)
//! - `s`     select the hovered region
//! - `q`     quit
//!
//! Pass a fragment as the first argument (e.g. `analisis-de-suelos`) to
//! deep-link into a showcase tab. Logs go to stderr; filter with
//! `RUST_LOG`.

use std::io::{stdout, Write};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::{cursor, execute, queue, style, terminal};

use vitrina::components::{
    carousel, media_presenter, region_map_from, showcase, typewriter, CarouselProps,
    MediaElement, MediaPresenterProps, RegionMapProps, ServiceEntry, ShowcaseProps,
    TypewriterProps,
};
use vitrina::error::PlaybackError;
use vitrina::geo::Region;
use vitrina::state::{route, timers};

/// Media backend that just logs the commands it receives.
struct DemoMedia {
    url: String,
}

impl MediaElement for DemoMedia {
    fn play(&mut self) -> Result<(), PlaybackError> {
        tracing::debug!(url = %self.url, "play");
        Ok(())
    }

    fn pause(&mut self) {
        tracing::debug!(url = %self.url, "pause");
    }

    fn rewind(&mut self) {
        tracing::debug!(url = %self.url, "rewind");
    }

    fn set_muted(&mut self, muted: bool) {
        tracing::debug!(url = %self.url, muted, "set_muted");
    }
}

fn services() -> Vec<ServiceEntry> {
    [
        ("Viveros Forestales", "seedling", "Producción de plantones nativos"),
        ("Analisis de Suelos", "flask", "Caracterización de suelos agrícolas"),
        ("Capacitacion", "graduation", "Talleres y asistencia técnica"),
        ("Proyectos", "map", "Formulación y evaluación de proyectos"),
    ]
    .into_iter()
    .map(|(title, icon, desc)| ServiceEntry {
        title: title.to_string(),
        short_desc: desc.to_string(),
        full_desc: format!("{desc}. Consulte nuestro catálogo completo."),
        icon: icon.to_string(),
        images: None,
    })
    .collect()
}

fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Some(fragment) = std::env::args().nth(1) {
        route::set_fragment(&fragment);
    }

    let typist = typewriter(TypewriterProps {
        words: vec![
            "Ecología".to_string(),
            "Reforestación".to_string(),
            "Desarrollo Sostenible".to_string(),
        ]
        .into(),
        ..Default::default()
    });

    let slides = carousel(CarouselProps {
        images: (1..=4)
            .map(|index| format!("campo-{index}.jpg"))
            .collect::<Vec<_>>()
            .into(),
        ..Default::default()
    });

    let presenter = media_presenter(
        MediaPresenterProps {
            poster: "portada.jpg".into(),
            videos: vec!["intro.mp4".into(), "vivero.mp4".into(), "campo.mp4".into()],
            ..Default::default()
        },
        |url| Box::new(DemoMedia { url: url.to_string() }),
    );

    let panel = showcase(ShowcaseProps {
        services: services(),
        default_image: "servicio.jpg".into(),
        images: Some(vec!["taller-1.jpg".into(), "taller-2.jpg".into()]),
        rotation_interval: 4000,
    });

    let map = region_map_from(
        ["CUSCO", "PUNO", "AREQUIPA", "MADRE DE DIOS"]
            .iter()
            .map(|name| Region { name: name.to_string() })
            .collect(),
        RegionMapProps {
            highlights: vec!["CUSCO".into(), "MADRE DE DIOS".into()],
            ..Default::default()
        },
    );
    let mut hovered: Option<usize> = None;

    terminal::enable_raw_mode()?;
    let mut out = stdout();
    execute!(out, terminal::EnterAlternateScreen, cursor::Hide)?;

    let mut last_frame = Instant::now();
    'main: loop {
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break 'main,
                    KeyCode::Char(digit @ '1'..='4') => {
                        panel.select(digit as usize - '1' as usize);
                    }
                    KeyCode::Char('n') => {
                        slides.go_to((slides.current.get() + 1) % slides.len().max(1));
                    }
                    KeyCode::Char('e') => presenter.ended(presenter.current.get()),
                    KeyCode::Char('h') => {
                        hovered = match hovered {
                            None => Some(0),
                            Some(index) if index + 1 < map.len() => Some(index + 1),
                            Some(_) => None,
                        };
                        map.hover(hovered);
                    }
                    KeyCode::Char('s') => {
                        if let Some(index) = hovered {
                            map.select(index);
                        }
                    }
                    _ => {}
                }
            }
        }

        let elapsed = last_frame.elapsed().as_millis() as u64;
        last_frame = Instant::now();
        timers::advance(elapsed);

        let caret = if typist.caret_visible.get() { "|" } else { " " };
        let service = panel
            .active_service()
            .map(|entry| format!("{} {} - {}", panel.active_glyph(), entry.title, entry.short_desc))
            .unwrap_or_default();
        let video = presenter
            .videos()
            .get(presenter.current.get())
            .cloned()
            .unwrap_or_else(|| presenter.poster.clone());
        let tooltip = map.tooltip.get().unwrap_or_else(|| "-".to_string());
        let notice = map.notice.get().unwrap_or_default();

        queue!(out, terminal::Clear(terminal::ClearType::All))?;
        for (row, line) in [
            format!("vitrina demo - q quits, 1-4 tabs, n/e/h/s interact"),
            format!("hero    {}{caret}", typist.text.get()),
            format!(
                "video   {video} (loaded: {})",
                if presenter.loaded.get() { "yes" } else { "no" }
            ),
            format!(
                "slides  image {}/{}",
                slides.current.get() + 1,
                slides.len()
            ),
            format!("tab     {service}"),
            format!(
                "imagen  {} (foto {}/{})",
                panel
                    .current_images()
                    .get(panel.image_cursor.get())
                    .cloned()
                    .unwrap_or_default(),
                panel.image_cursor.get() + 1,
                panel.current_images().len()
            ),
            format!("mapa    hover: {tooltip}  {notice}"),
        ]
        .into_iter()
        .enumerate()
        {
            queue!(out, cursor::MoveTo(0, row as u16), style::Print(line))?;
        }
        out.flush()?;

        std::thread::sleep(Duration::from_millis(33));
    }

    execute!(out, cursor::Show, terminal::LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;

    typist.unmount();
    slides.unmount();
    presenter.unmount();
    panel.unmount();
    Ok(())
}
