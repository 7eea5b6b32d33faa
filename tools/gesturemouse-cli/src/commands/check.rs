//! Check system capabilities.

use gesturemouse_common::config::AppConfig;
use gesturemouse_platform_linux::permissions::{
    all_required_available, check_capabilities, print_capability_report,
};
use gesturemouse_platform_linux::{detect_display_server, DisplayServer, XdotoolBackend};
use gesturemouse_platform_core::DisplayGeometry;

pub fn run(config: &AppConfig) -> anyhow::Result<()> {
    println!("GestureMouse System Check");
    println!("{}", "=".repeat(50));

    match detect_display_server() {
        DisplayServer::X11 => println!("[OK] Display server: X11"),
        DisplayServer::Wayland => println!("[WARN] Display server: Wayland (XWayland only)"),
        DisplayServer::Unknown => println!("[WARN] Display server: Unknown"),
    }

    if XdotoolBackend::is_available() {
        match XdotoolBackend::new().screen_size() {
            Ok(size) => println!("[OK] Screen: {}x{}", size.width, size.height),
            Err(e) => println!("[WARN] Screen size unavailable: {e}"),
        }
    }

    let capabilities = check_capabilities(config);
    println!();
    print_capability_report(&capabilities);

    println!();
    if all_required_available(&capabilities) {
        println!("All required capabilities are available. GestureMouse is ready.");
    } else {
        println!("Some required capabilities are missing. See above for fixes.");
    }

    Ok(())
}
