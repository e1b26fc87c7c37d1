use crate::commands::decode::read_texture;
use angel_tex::{Texture, TextureFlags};
use argh::FromArgs;
use bytesize::ByteSize;
use std::fmt::Write;
use std::path::PathBuf;

#[derive(FromArgs, Debug)]
/// Print the header and mip chain of a TEX texture
#[argh(subcommand, name = "info")]
pub struct InfoCmd {
    /// input texture
    #[argh(option)]
    pub input: PathBuf,
}

pub fn handle_info_command(cmd: InfoCmd) -> Result<(), Box<dyn std::error::Error>> {
    let texture = read_texture(&cmd.input)?;
    println!("{}", cmd.input.display());
    print!("{}", describe(&texture));
    Ok(())
}

/// Names of the known flags that are set, plus any unknown bits.
fn flag_names(flags: TextureFlags) -> String {
    let mut names: Vec<String> = [
        (flags.clamp_u(), "clamp-u"),
        (flags.clamp_v(), "clamp-v"),
        (flags.cloud_shadows_low(), "cloud-shadows-low"),
        (flags.cloud_shadows_high(), "cloud-shadows-high"),
        (flags.transparent(), "transparent"),
    ]
    .into_iter()
    .filter(|(set, _)| *set)
    .map(|(_, name)| name.to_string())
    .collect();

    if flags.unknown_bits() != 0 {
        names.push(format!("unknown 0x{:08X}", flags.unknown_bits()));
    }
    if names.is_empty() {
        return "none".to_string();
    }
    names.join(", ")
}

/// Human readable summary of a texture.
pub fn describe(texture: &Texture) -> String {
    let mut out = String::new();
    let format = texture.format();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "  Size:     {}x{}", texture.width(), texture.height());
    let _ = writeln!(out, "  Format:   {format} (code {})", format.code());
    let _ = writeln!(
        out,
        "  Flags:    {} (0x{:08X})",
        flag_names(texture.flags()),
        texture.flags().bits()
    );
    if format.is_paletted() {
        let _ = writeln!(out, "  Palette:  {} entries", texture.palette().len());
    } else {
        let _ = writeln!(out, "  Palette:  none");
    }
    let _ = writeln!(out, "  Mipmaps:  {}", texture.mipmap_count());
    for mip in 0..texture.mipmap_count() {
        let (width, height) = texture.mip_dimensions(mip);
        let _ = writeln!(
            out,
            "    {mip}: {width}x{height}, {}",
            ByteSize(texture.mip_data_size(mip) as u64)
        );
    }
    let _ = writeln!(
        out,
        "  Total:    {}",
        ByteSize(texture.serialized_size() as u64)
    );
    out
}
