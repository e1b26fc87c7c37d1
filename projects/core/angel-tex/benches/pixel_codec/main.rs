use angel_tex::{CodecSettings, Color8888, MipmapFilter, Texture, TextureFormat};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use core::hint::black_box;

const SIZE: u16 = 512;

fn pattern(x: u32, y: u32) -> Color8888 {
    Color8888::new((x * 3) as u8, (y * 5) as u8, (x ^ y) as u8, (x + y) as u8)
}

fn criterion_benchmark(c: &mut Criterion) {
    let settings = CodecSettings::default();
    let pixels = SIZE as u64 * SIZE as u64;

    let mut group = c.benchmark_group("Pixel Codec");
    group.throughput(criterion::Throughput::Elements(pixels));

    for format in [
        TextureFormat::A1R5G5B5,
        TextureFormat::A4I4,
        TextureFormat::A8I8,
        TextureFormat::RGB888,
        TextureFormat::RGB8888,
    ] {
        let mut texture = Texture::new(SIZE, SIZE, format, 1).unwrap();

        group.bench_with_input(BenchmarkId::new("set_pixel", format), &format, |b, _| {
            b.iter(|| {
                for y in 0..SIZE as u32 {
                    for x in 0..SIZE as u32 {
                        texture
                            .set_pixel(x, y, 0, pattern(x, y), &settings)
                            .unwrap();
                    }
                }
            })
        });

        group.bench_with_input(BenchmarkId::new("get_pixel", format), &format, |b, _| {
            b.iter(|| {
                for y in 0..SIZE as u32 {
                    for x in 0..SIZE as u32 {
                        black_box(texture.get_pixel(x, y, 0).unwrap());
                    }
                }
            })
        });
    }
    group.finish();

    let mut group = c.benchmark_group("Mipmaps");
    let mut texture = Texture::with_mipmaps(SIZE, SIZE, TextureFormat::RGB8888, true).unwrap();
    group.bench_function("nearest_rgb8888", |b| {
        b.iter(|| {
            texture
                .generate_mipmaps(MipmapFilter::Nearest, &settings)
                .unwrap();
        })
    });

    let mut texture = Texture::with_mipmaps(SIZE, SIZE, TextureFormat::P8, true).unwrap();
    group.bench_function("raw_copy_p8", |b| {
        b.iter(|| {
            texture
                .generate_mipmaps(MipmapFilter::Nearest, &settings)
                .unwrap();
        })
    });
    group.finish();

    let mut group = c.benchmark_group("Serialization");
    let texture = Texture::with_mipmaps(SIZE, SIZE, TextureFormat::RGB8888, true).unwrap();
    let bytes = texture.to_bytes();
    group.throughput(criterion::Throughput::Bytes(bytes.len() as u64));
    group.bench_function("to_bytes", |b| b.iter(|| black_box(texture.to_bytes())));
    group.bench_function("from_bytes", |b| {
        b.iter(|| black_box(Texture::from_bytes(&bytes, &settings).unwrap()))
    });
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
