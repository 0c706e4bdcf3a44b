use std::io::{self, Write};
use tui_banner::{Banner, Gradient, Palette, Align, Fill};

/// Print a cinematic banner for tunepull
pub fn print_banner() {
    let banner = Banner::new("tunepull")
        .unwrap()
        .gradient(Gradient::diagonal(Palette::from_hex(&[
            "#FF0000",
            "#FF8000",
            "#FFFF00",
            "#00FF80",
            "#00FFFF",
            "#0080FF",
        ])))
        .fill(Fill::Keep)
        .align(Align::Left)
        .padding(0);

    let output = banner.render();
    println!("{}", output);
    println!("  {} {}",
        console::style("YouTube Music Downloader").white().bold(),
        console::style("• Batch • Audio-only • MP3").dim()
    );
    println!();

    let _ = io::stdout().flush();
}
