use super::*;

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "reelcut_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn store_with(name: &str, files: &[(&str, &str, &str)]) -> PathBuf {
    let root = temp_dir(name);
    for (analysis_id, quality, filename) in files {
        let dir = root.join(analysis_id).join("segments").join(quality);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(filename), b"\0\0\0\x18ftypmp42").unwrap();
    }
    root
}

fn local(store_root: &Path) -> MediaLocationResolver {
    MediaLocationResolver::new(ResolverConfig {
        store_root: store_root.to_path_buf(),
        ..ResolverConfig::default()
    })
}

fn remote() -> MediaLocationResolver {
    MediaLocationResolver::new(ResolverConfig {
        mode: ResolutionMode::RemotePassthrough,
        ..ResolverConfig::default()
    })
}

#[test]
fn empty_reference_is_empty_error() {
    let r = local(Path::new("/nonexistent"));
    assert_eq!(r.resolve(""), Err(ResolutionError::Empty));
    assert_eq!(r.resolve("   "), Err(ResolutionError::Empty));
}

#[test]
fn segment_reference_resolves_to_existing_store_file() {
    let root = store_with("resolve_existing", &[("ID1", "mezzanine", "clip.mp4")]);
    let r = local(&root);

    let got = r.resolve("/api/segment/ID1/mezzanine/clip.mp4").unwrap();
    assert_eq!(
        got,
        ResolvedSource::LocalFile(root.join("ID1/segments/mezzanine/clip.mp4"))
    );
    // Same store state, same answer.
    assert_eq!(r.resolve("/api/segment/ID1/mezzanine/clip.mp4").unwrap(), got);
}

#[test]
fn segment_reference_with_custom_route_prefix() {
    let r = MediaLocationResolver::new(ResolverConfig {
        store_root: PathBuf::from("/store"),
        segment_route: "prefix".into(),
        ..ResolverConfig::default()
    });
    assert_eq!(
        r.resolve("prefix/ID1/mezzanine/clip.mp4"),
        Err(ResolutionError::NotFound(PathBuf::from(
            "/store/ID1/segments/mezzanine/clip.mp4"
        )))
    );
}

#[test]
fn missing_segment_file_is_not_found() {
    let root = store_with("resolve_missing", &[("ID1", "proxy", "other.mp4")]);
    let r = local(&root);
    assert_eq!(
        r.resolve("/api/segment/ID1/proxy/clip.mp4"),
        Err(ResolutionError::NotFound(
            root.join("ID1/segments/proxy/clip.mp4")
        ))
    );
}

#[test]
fn short_or_malformed_segment_references_are_unresolvable() {
    let r = local(Path::new("/store"));
    for reference in [
        "/api/segment/ID1/mezzanine",
        "/api/segment/ID1/mezzanine/",
        "/api/segment/ID1/4k/clip.mp4",
        "/api/segment/../mezzanine/clip.mp4",
        "/api/segment/ID1/mezzanine/clip.mp4/extra",
    ] {
        assert_eq!(
            r.resolve(reference),
            Err(ResolutionError::Unresolvable(reference.to_owned())),
            "{reference}"
        );
    }
}

#[test]
fn absolute_local_paths_pass_through_unchanged() {
    let r = local(Path::new("/store"));
    assert_eq!(
        r.resolve("/some/absolute/path.mp4"),
        Ok(ResolvedSource::LocalFile(PathBuf::from(
            "/some/absolute/path.mp4"
        )))
    );
    assert_eq!(
        r.resolve("file:///media/intro.mp4"),
        Ok(ResolvedSource::LocalFile(PathBuf::from("/media/intro.mp4")))
    );
}

#[test]
fn other_api_paths_and_relative_names_are_unresolvable_passthrough() {
    let r = local(Path::new("/store"));
    let reference = "/api/translated-video/translated_e00c5bec_7b60ae40.mp4";
    let err = r.resolve(reference).unwrap_err();
    assert_eq!(err.passthrough(), Some(reference));

    let err = r.resolve("clip.mp4").unwrap_err();
    assert_eq!(err, ResolutionError::Unresolvable("clip.mp4".to_owned()));
}

#[test]
fn references_are_returned_untrimmed() {
    let r = local(Path::new("/store"));
    assert_eq!(
        r.resolve("/media/take 2.mp4 "),
        Ok(ResolvedSource::LocalFile(PathBuf::from("/media/take 2.mp4 ")))
    );
    assert_eq!(
        r.resolve(" /media/a.mp4"),
        Err(ResolutionError::Unresolvable(" /media/a.mp4".to_owned()))
    );
    assert_eq!(
        remote().resolve("https://cdn.example.com/a.mp4\n"),
        Ok(ResolvedSource::Remote("https://cdn.example.com/a.mp4\n".to_owned()))
    );
}

#[test]
fn remote_urls_are_rejected_in_local_mode() {
    let r = local(Path::new("/store"));
    assert_eq!(
        r.resolve("http://example.com/video.mp4"),
        Err(ResolutionError::RemoteUnsupported(
            "http://example.com/video.mp4".to_owned()
        ))
    );
    assert!(matches!(
        r.resolve("HTTPS://example.com/video.mp4"),
        Err(ResolutionError::RemoteUnsupported(_))
    ));
}

#[test]
fn api_urls_on_the_configured_base_map_back_to_the_store() {
    let root = store_with("resolve_base_url", &[("a499", "mezzanine", "scene_1.mp4")]);
    let r = local(&root);
    assert_eq!(
        r.resolve("http://localhost:8080/api/segment/a499/mezzanine/scene_1.mp4"),
        Ok(ResolvedSource::LocalFile(
            root.join("a499/segments/mezzanine/scene_1.mp4")
        ))
    );
    assert!(matches!(
        r.resolve("http://localhost:8080/api/translated-video/t.mp4"),
        Err(ResolutionError::RemoteUnsupported(_))
    ));
}

#[test]
fn remote_mode_rewrites_segments_to_urls_without_touching_disk() {
    let r = remote();
    assert_eq!(
        r.resolve("/api/segment/ID1/proxy/clip.mp4"),
        Ok(ResolvedSource::Remote(
            "http://localhost:8080/api/segment/ID1/proxy/clip.mp4".to_owned()
        ))
    );
    assert_eq!(
        r.resolve("https://cdn.example.com/a.mp4"),
        Ok(ResolvedSource::Remote("https://cdn.example.com/a.mp4".to_owned()))
    );
}

#[test]
fn segment_ref_parse_and_store_path() {
    let seg = SegmentRef::parse("ID1/proxy/clip.mp4").unwrap();
    assert_eq!(seg.analysis_id, "ID1");
    assert_eq!(seg.quality, SegmentQuality::Proxy);
    assert_eq!(
        seg.store_path(Path::new("/store")),
        PathBuf::from("/store/ID1/segments/proxy/clip.mp4")
    );
    assert!(SegmentRef::parse("ID1/proxy").is_none());
    assert!(SegmentRef::parse("ID1//clip.mp4").is_none());
}
