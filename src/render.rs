use crate::chain::Chain;
use crate::config::Config;
use crate::surface::Surface;

/// Clears `surface` and paints every segment, head first.
///
/// Positions are pulled back inside the surface here, never in the motion
/// code, so a segment left outside by a shrink is still drawn at the edge.
pub fn render<S: Surface + ?Sized>(surface: &mut S, chain: &Chain, config: &Config) {
    let size = surface.size();
    let t = config.thickness as i32;
    let max_x = size.width as i32 - t;
    let max_y = size.height as i32 - t;

    surface.clear();
    for (i, seg) in chain.iter().enumerate() {
        let x = clamp_axis(seg.x, max_x);
        let y = clamp_axis(seg.y, max_y);
        let color = config.color.color_at(i, config.length);
        surface.fill_rect(x, y, config.thickness, config.thickness, color.rgb());
    }
}

fn clamp_axis(v: i32, max: i32) -> i32 {
    if v > max {
        max
    } else if v <= 0 {
        0
    } else {
        v
    }
}
