use cube_ngin::Config;

fn main() -> anyhow::Result<()> {
    let mut config = Config::default();
    // An optional first argument replaces the bundled texture.
    if let Some(texture) = std::env::args().nth(1) {
        config = config.with_texture(texture);
    }
    cube_ngin::run(config)
}
