use crate::*;
use std::fmt::{self, Write};

pub const DEFAULT_PLAYER_NAME: &str = "Winter Blood";

pub const DEFAULT_ZOOM: u32 = 100;

/// Values of the fixed preamble that places the viewer and frames the screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bootstrap {
    pub player_name: String,
    pub zoom: u32,
}

impl Default for Bootstrap {
    fn default() -> Self {
        Self {
            player_name: DEFAULT_PLAYER_NAME.to_owned(),
            zoom: DEFAULT_ZOOM,
        }
    }
}

/// Renders the whole map: preamble, cells, action banks, then events in
/// emission order.
pub fn render(
    params: &Params,
    palette: &PaletteSpace,
    addresses: &Addresses,
    events: &[DelayedEvent],
) -> Result<String> {
    let mut out = String::new();

    write_map(&mut out, params, palette, addresses, events)
        .map_err(|err| anyhow::Error::new(err).context("Couldn't render map"))?;

    Ok(out)
}

fn write_map(
    out: &mut impl Write,
    params: &Params,
    palette: &PaletteSpace,
    addresses: &Addresses,
    events: &[DelayedEvent],
) -> fmt::Result {
    write_bootstrap(out, params)?;
    write_cells(out, params, addresses)?;
    write_actions(out, palette, addresses)?;
    write_events(out, events)
}

fn write_bootstrap(out: &mut impl Write, params: &Params) -> fmt::Result {
    let Bootstrap { player_name, zoom } = params.bootstrap();
    let player_x = params.half_width() + 50;
    let player_y = params.half_height() + 50;
    let ground_x = -params.half_width() - 550;
    let ground_width = -2 * ground_x;

    write!(
        out,
        r##"<player uid="#player*1" x="{}" y="{}" tox="0" toy="0" hea="500" hmax="500" "##,
        player_x, player_y
    )?;
    write!(
        out,
        r##"team="0" side="1" char="77" incar="-1" botaction="0" ondeath="-1" /> "##
    )?;
    write!(
        out,
        r##"<box x="{}" y="{}" w="{}" h="500" m="0" /> "##,
        ground_x, player_y, ground_width
    )?;
    write!(
        out,
        r##"<trigger uid="#trigger*9999999" x="310" y="20" enabled="true" maxcalls="1" "##
    )?;
    write!(
        out,
        r##"actions_1_type="51" actions_1_targetA="{}" actions_1_targetB="0" "##,
        zoom
    )?;
    write!(
        out,
        r##"actions_2_type="52" actions_2_targetA="#player*1" actions_2_targetB="{}"/> "##,
        escape(player_name)
    )?;
    write!(
        out,
        r##"<timer uid="#timer*9999999" x="310" y="-10" enabled="true" maxcalls="1" "##
    )?;
    write!(out, r##"target="#trigger*9999999" delay="0" />"##)
}

fn write_cells(out: &mut impl Write, params: &Params, addresses: &Addresses) -> fmt::Result {
    let grid = params.grid();
    let size = params.pixel_size();

    for cell in 0..grid.cells() {
        let (row, col) = grid.cell_pos(cell);

        write!(
            out,
            r##"<door uid="#*{}" x="{}" y="{}" w="{}" h="{}" tarx="0" tary="0" vis="true"/>"##,
            addresses.cell_token(cell),
            params.cell_x(col),
            params.cell_y(row),
            size,
            size
        )?;
    }

    Ok(())
}

fn write_actions(out: &mut impl Write, palette: &PaletteSpace, addresses: &Addresses) -> fmt::Result {
    for cell in 0..addresses.cells() {
        let door = addresses.cell_token(cell);

        for entry in palette.entries() {
            write!(
                out,
                r##"<trigger uid="#{}" enabled="true" maxcalls="-1" actions_1_type="71" actions_1_targetA="#*{}" actions_1_targetB="#{}"/>"##,
                addresses.action_token(cell, entry.index()),
                door,
                entry.hex()
            )?;
        }
    }

    Ok(())
}

fn write_events(out: &mut impl Write, events: &[DelayedEvent]) -> fmt::Result {
    for event in events {
        write!(
            out,
            r##"<timer enabled="true" maxcalls="1" target="#{}" delay="{}"/>"##,
            token::encode(event.action),
            event.delay
        )?;
    }

    Ok(())
}

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            c => escaped.push(c),
        }
    }

    escaped
}
