automod::dir!(pub "src/commands");
