use crate::error::CliError;
use crate::util::{
    canonicalize_cli_path, collect_inputs, create_parent_dir, is_texture_path, output_path,
    process_files,
};
use angel_tex::{CodecSettings, Texture};
use angel_tex_bcn::DxtBlockCodec;
use angel_tex_image::decode_texture;
use argh::FromArgs;
use image::ImageFormat;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(FromArgs, Debug)]
/// Convert TEX textures into PNG images
#[argh(subcommand, name = "decode")]
pub struct DecodeCmd {
    /// input texture or directory of textures
    #[argh(option)]
    pub input: PathBuf,

    /// output directory path
    #[argh(option, from_str_fn(canonicalize_cli_path))]
    pub output: PathBuf,

    /// mip level to export [default: 0]
    #[argh(option, default = "0")]
    pub mip: usize,
}

pub fn handle_decode_command(cmd: DecodeCmd) -> Result<(), Box<dyn std::error::Error>> {
    let files = collect_inputs(&cmd.input, is_texture_path)?;
    if files.is_empty() {
        println!("No textures found in input directory.");
        return Ok(());
    }

    println!("Decoding mip {} of {} textures\n", cmd.mip, files.len());

    let start = Instant::now();
    let summary = process_files(&files, |path| {
        let target = output_path(&cmd.input, path, &cmd.output, "png");
        decode_file(path, &target, cmd.mip)
    });
    summary.print("Decode", start.elapsed());

    Ok(())
}

/// Reads a texture from disk.
pub fn read_texture(path: &Path) -> Result<Texture, CliError> {
    let mut reader = BufReader::new(File::open(path)?);
    Ok(Texture::read_from(&mut reader, &CodecSettings::default())?)
}

/// Exports mip level `mip` of a TEX file as a PNG and returns the number of bytes written.
pub fn decode_file(input: &Path, output: &Path, mip: usize) -> Result<u64, CliError> {
    let texture = read_texture(input)?;
    let image = decode_texture(&texture, mip, &DxtBlockCodec)?;

    create_parent_dir(output)?;
    image.save_with_format(output, ImageFormat::Png)?;
    Ok(fs::metadata(output)?.len())
}
