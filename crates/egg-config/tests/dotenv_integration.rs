//! `.env` files flow through figment like real environment variables.

use egg_config::EggConfig;
use figment::Jail;
use pretty_assertions::assert_eq;

#[test]
fn dotenv_next_to_config_file_is_loaded() {
    Jail::expect_with(|jail| {
        jail.create_dir("deploy")?;
        jail.create_file("deploy/bot.toml", "[logging]\nlevel = \"info\"\n")?;
        jail.create_file(
            "deploy/.env",
            "OBJEGGTIVES_DISCORD__TOKEN=from-dotenv\nOBJEGGTIVES_DISCORD__GUILD_ID=77\n",
        )?;

        let config = EggConfig::load_with_dotenv(Some(std::path::Path::new("deploy/bot.toml")))
            .expect("config loads");
        assert_eq!(config.discord.token, "from-dotenv");
        assert_eq!(config.discord.guild_id, Some(77));
        Ok(())
    });
}
