use tinybot::config::Config;

#[test]
fn test_config_defaults() {
    let cfg = Config::default();

    assert_eq!(cfg.server.listen_addr, "127.0.0.1:8080");
    assert_eq!(cfg.pool.chunk_size, 0);
    assert_eq!(cfg.pool.initial_chunks, 1);
}

#[test]
fn test_config_from_yaml() {
    let cfg = Config::from_yaml(
        "server:\n  listen_addr: \"0.0.0.0:9000\"\npool:\n  chunk_size: 8192\n  initial_chunks: 2\n",
    )
    .unwrap();

    assert_eq!(cfg.server.listen_addr, "0.0.0.0:9000");
    assert_eq!(cfg.pool.chunk_size, 8192);
    assert_eq!(cfg.pool.initial_chunks, 2);
}

#[test]
fn test_config_partial_yaml_keeps_defaults() {
    let cfg = Config::from_yaml("server:\n  listen_addr: \"127.0.0.1:3000\"\n").unwrap();

    assert_eq!(cfg.server.listen_addr, "127.0.0.1:3000");
    assert_eq!(cfg.pool.initial_chunks, 1);
}

#[test]
fn test_config_invalid_yaml_fails() {
    assert!(Config::from_yaml("server: [not, a, mapping").is_err());
}

#[test]
fn test_config_clone() {
    let cfg1 = Config::default();
    let cfg2 = cfg1.clone();
    assert_eq!(cfg1.server.listen_addr, cfg2.server.listen_addr);
}

#[test]
fn test_config_custom_address_from_env() {
    unsafe {
        std::env::set_var("LISTEN", "0.0.0.0:3000");
    }
    let cfg = Config::load().unwrap();
    assert_eq!(cfg.server.listen_addr, "0.0.0.0:3000");
    unsafe {
        std::env::remove_var("LISTEN");
    }
}
