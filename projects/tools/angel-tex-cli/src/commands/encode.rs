use crate::error::CliError;
use crate::util::{
    canonicalize_cli_path, collect_inputs, create_parent_dir, is_image_path, output_path,
    process_files,
};
use angel_tex::{CompressionQuality, TextureFormat, DEFAULT_ALPHA_REF};
use angel_tex_bcn::DxtBlockCodec;
use angel_tex_image::{encode_image, ImageResampler, NeuQuantizer, SaveOptions};
use argh::FromArgs;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(FromArgs, Debug)]
/// Convert images into TEX textures
#[argh(subcommand, name = "encode")]
pub struct EncodeCmd {
    /// input image or directory of images
    #[argh(option)]
    pub input: PathBuf,

    /// output directory path
    #[argh(option, from_str_fn(canonicalize_cli_path))]
    pub output: PathBuf,

    /// texture format, e.g. p8, pa8, a1r5g5b5, rgb888, rgb8888, dxt1, dxt5 [default: rgb8888]
    #[argh(option, default = "TextureFormat::RGB8888")]
    pub format: TextureFormat,

    /// clamp texture coordinates on the U axis
    #[argh(switch)]
    pub clamp_u: bool,

    /// clamp texture coordinates on the V axis
    #[argh(switch)]
    pub clamp_v: bool,

    /// cast low cloud shadows
    #[argh(switch)]
    pub cloud_shadows_low: bool,

    /// cast high cloud shadows
    #[argh(switch)]
    pub cloud_shadows_high: bool,

    /// alpha threshold for 1 bit alpha (a1r5g5b5) [default: 128]
    #[argh(option, default = "DEFAULT_ALPHA_REF")]
    pub alpha_cutoff: u8,

    /// mip levels below the base level, 1 to 12 [default: 8]
    #[argh(option, default = "8")]
    pub mip_count: u8,

    /// only write the base level
    #[argh(switch)]
    pub no_mipmaps: bool,

    /// faster, lower quality DXT compression
    #[argh(switch)]
    pub fast: bool,
}

impl EncodeCmd {
    /// Save options described by the flags.
    pub fn options(&self) -> SaveOptions {
        SaveOptions::builder()
            .format(self.format)
            .clamp_u(self.clamp_u)
            .clamp_v(self.clamp_v)
            .cloud_shadows_low(self.cloud_shadows_low)
            .cloud_shadows_high(self.cloud_shadows_high)
            .alpha_cutoff(self.alpha_cutoff)
            .generate_mipmaps(!self.no_mipmaps)
            .additional_mipmaps(self.mip_count)
            .quality(if self.fast {
                CompressionQuality::Fast
            } else {
                CompressionQuality::High
            })
            .build()
    }
}

pub fn handle_encode_command(cmd: EncodeCmd) -> Result<(), Box<dyn std::error::Error>> {
    let files = collect_inputs(&cmd.input, is_image_path)?;
    if files.is_empty() {
        println!("No images found in input directory.");
        return Ok(());
    }

    let options = cmd.options();
    println!(
        "Encoding {} images as {} ({} levels max)\n",
        files.len(),
        options.format,
        options.mipmap_count()
    );

    let start = Instant::now();
    let summary = process_files(&files, |path| {
        let target = output_path(&cmd.input, path, &cmd.output, "tex");
        encode_file(path, &target, &options)
    });
    summary.print("Encode", start.elapsed());

    Ok(())
}

/// Encodes one image file into a TEX file and returns the number of bytes written.
pub fn encode_file(input: &Path, output: &Path, options: &SaveOptions) -> Result<u64, CliError> {
    let image = image::open(input)?.to_rgba8();
    let texture = encode_image(
        &image,
        options,
        &NeuQuantizer::default(),
        &ImageResampler,
        &DxtBlockCodec,
    )?;

    create_parent_dir(output)?;
    let mut writer = BufWriter::new(File::create(output)?);
    texture.write_to(&mut writer)?;
    writer.flush()?;

    Ok(texture.serialized_size() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use angel_tex::{CodecSettings, Texture};
    use image::{Rgba, RgbaImage};
    use rstest::rstest;
    use std::fs;

    fn command(input: &Path, output: &Path) -> EncodeCmd {
        EncodeCmd {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            format: TextureFormat::RGB8888,
            clamp_u: false,
            clamp_v: false,
            cloud_shadows_low: false,
            cloud_shadows_high: false,
            alpha_cutoff: DEFAULT_ALPHA_REF,
            mip_count: 8,
            no_mipmaps: false,
            fast: false,
        }
    }

    fn write_png(path: &Path, width: u32, height: u32) {
        create_parent_dir(path).unwrap();
        RgbaImage::from_fn(width, height, |x, y| Rgba([(x * 8) as u8, (y * 8) as u8, 90, 255]))
            .save(path)
            .unwrap();
    }

    fn load(path: &Path) -> Texture {
        Texture::from_bytes(&fs::read(path).unwrap(), &CodecSettings::default()).unwrap()
    }

    #[test]
    fn flags_map_onto_options() {
        let mut cmd = command(Path::new("in"), Path::new("out"));
        cmd.format = TextureFormat::DXT1;
        cmd.clamp_v = true;
        cmd.cloud_shadows_high = true;
        cmd.alpha_cutoff = 7;
        cmd.mip_count = 20;
        cmd.fast = true;

        let options = cmd.options();
        assert_eq!(options.format, TextureFormat::DXT1);
        assert!(options.clamp_v && !options.clamp_u);
        assert!(options.cloud_shadows_high && !options.cloud_shadows_low);
        assert_eq!(options.alpha_cutoff, 7);
        assert_eq!(options.additional_mipmaps, 12);
        assert_eq!(options.quality, CompressionQuality::Fast);
    }

    #[test]
    fn no_mipmaps_writes_one_level() {
        let mut cmd = command(Path::new("in"), Path::new("out"));
        cmd.no_mipmaps = true;
        assert_eq!(cmd.options().mipmap_count(), 1);
    }

    #[rstest]
    #[case(TextureFormat::RGB8888)]
    #[case(TextureFormat::P8)]
    #[case(TextureFormat::DXT1)]
    fn encode_file_writes_a_texture(#[case] format: TextureFormat) {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("wall.png");
        let output = dir.path().join("out/wall.tex");
        write_png(&input, 32, 32);

        let options = SaveOptions::builder().format(format).clamp_u(true).build();
        let written = encode_file(&input, &output, &options).unwrap();

        assert_eq!(written, fs::metadata(&output).unwrap().len());
        let texture = load(&output);
        assert_eq!(texture.format(), format);
        assert_eq!((texture.width(), texture.height()), (32, 32));
        assert_eq!(texture.mipmap_count(), 3);
        assert!(texture.flags().clamp_u());
    }

    #[test]
    fn unreadable_image_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("broken.png");
        fs::write(&input, b"not a png").unwrap();

        let result = encode_file(&input, &dir.path().join("broken.tex"), &SaveOptions::default());
        assert!(matches!(result, Err(CliError::Image(_))));
    }

    #[test]
    fn directories_are_encoded_recursively() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in");
        let output = dir.path().join("out");
        write_png(&input.join("a.png"), 16, 16);
        write_png(&input.join("nested/b.png"), 8, 8);
        fs::write(input.join("readme.txt"), b"skip me").unwrap();

        handle_encode_command(command(&input, &output)).unwrap();

        assert_eq!(load(&output.join("a.tex")).mipmap_count(), 2);
        assert_eq!(load(&output.join("nested/b.tex")).mipmap_count(), 1);
        assert!(!output.join("readme.tex").exists());
    }
}
