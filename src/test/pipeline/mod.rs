mod workers;

use crate::{
    test::{usecase::*, utils::*},
    walker, Algorithm, Options, Stage, E,
};
use std::{collections::HashMap, fs, io, path::PathBuf};

const COMPLETE: [Stage; 4] = [Stage::Walking, Stage::Draining, Stage::Done, Stage::Reported];

#[test]
fn scenario() -> Result<(), E> {
    let usecase = UseCase::named(&[("a.txt", b"hello"), ("b/c.txt", b"")])?;
    let (summary, memory) = run(&usecase, 4)?;
    let expected: HashMap<PathBuf, String> = HashMap::from([
        (usecase.root.join("a.txt"), SHA256_HELLO.to_owned()),
        (usecase.root.join("b").join("c.txt"), SHA256_EMPTY.to_owned()),
    ]);
    assert_eq!(memory.digests(), expected);
    assert!(memory.errors().is_empty());
    assert_eq!(summary.discovered, 2);
    assert_eq!(summary.hashed, 2);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.stages, COMPLETE);
    assert_eq!(memory.orphans(), 0);
    usecase.clean()?;
    Ok(())
}

#[test]
fn correction() -> Result<(), E> {
    let usecase = UseCase::unnamed(3, 4, 2)?;
    let (summary, memory) = run(&usecase, 4)?;
    assert_eq!(memory.digests(), usecase.digests()?);
    assert_eq!(memory.paths(), sorted(&usecase.files));
    assert_eq!(sorted(&memory.announced()), sorted(&usecase.files));
    assert_eq!(summary.discovered, usecase.files.len());
    assert_eq!(summary.processed.iter().sum::<usize>(), usecase.files.len());
    assert_eq!(memory.orphans(), 0);
    usecase.clean()?;
    Ok(())
}

#[test]
fn determinism() -> Result<(), E> {
    let usecase = UseCase::unnamed(3, 4, 2)?;
    let (_, a) = run(&usecase, 4)?;
    let (_, b) = run(&usecase, 7)?;
    assert_eq!(a.digests(), b.digests());
    usecase.clean()?;
    Ok(())
}

#[test]
fn changes() -> Result<(), E> {
    let usecase = UseCase::unnamed(2, 3, 1)?;
    let (_, a) = run(&usecase, 4)?;
    usecase.change(3)?;
    let (_, b) = run(&usecase, 4)?;
    assert_eq!(a.digests().len(), b.digests().len());
    assert_ne!(a.digests(), b.digests());
    assert_eq!(b.digests(), usecase.digests()?);
    usecase.clean()?;
    Ok(())
}

#[test]
fn empty_dest_folder() -> Result<(), E> {
    let usecase = UseCase::empty()?;
    let (summary, memory) = run(&usecase, 4)?;
    assert_eq!(memory.count(), 0);
    assert_eq!(summary.discovered, 0);
    assert_eq!(summary.hashed, 0);
    assert_eq!(summary.stages, COMPLETE);
    usecase.clean()?;
    Ok(())
}

#[test]
fn empty_folders() -> Result<(), E> {
    let usecase = UseCase::unnamed(5, 0, 3)?;
    let (summary, memory) = run(&usecase, 4)?;
    assert_eq!(memory.count(), 0);
    assert_eq!(summary.discovered, 0);
    usecase.clean()?;
    Ok(())
}

#[test]
fn empty_file() -> Result<(), E> {
    let usecase = UseCase::named(&[("empty", b"")])?;
    let (_, memory) = run(&usecase, 1)?;
    assert_eq!(
        memory.digests().get(&usecase.root.join("empty")),
        Some(&SHA256_EMPTY.to_owned())
    );
    usecase.clean()?;
    Ok(())
}

#[test]
fn blake3() -> Result<(), E> {
    let usecase = UseCase::unnamed(2, 3, 1)?;
    let memory = Memory::new();
    Options::new()
        .root(&usecase.root)
        .algorithm(Algorithm::Blake3)
        .pipeline()?
        .run(memory.clone())?;
    let expected = usecase
        .files
        .iter()
        .map(|path| -> Result<(PathBuf, String), io::Error> {
            Ok((path.clone(), blake3::hash(&fs::read(path)?).to_hex().to_string()))
        })
        .collect::<Result<HashMap<PathBuf, String>, io::Error>>()?;
    assert_eq!(memory.digests(), expected);
    usecase.clean()?;
    Ok(())
}

#[test]
fn exclude() -> Result<(), E> {
    let usecase = UseCase::named(&[("a.txt", b"hello"), ("target/b.bin", b"b")])?;
    let memory = Memory::new();
    let summary = Options::new()
        .root(&usecase.root)
        .exclude("target")?
        .pipeline()?
        .run(memory.clone())?;
    assert_eq!(summary.discovered, 1);
    assert_eq!(memory.paths(), vec![usecase.root.join("a.txt")]);
    usecase.clean()?;
    Ok(())
}

#[test]
fn no_root() -> Result<(), E> {
    let pipeline = Options::new().pipeline()?;
    assert!(matches!(pipeline.run(Memory::new()), Err(E::NoRoot)));
    Ok(())
}

#[test]
fn missing_root() -> Result<(), E> {
    let usecase = UseCase::empty()?;
    usecase.clean()?;
    let memory = Memory::new();
    let result = Options::new()
        .root(&usecase.root)
        .pipeline()?
        .run(memory.clone());
    assert!(matches!(
        result,
        Err(E::Walker(walker::E::IOError(ref path, _))) if path == &usecase.root
    ));
    assert_eq!(memory.count(), 0);
    assert!(memory.announced().is_empty());
    Ok(())
}

#[test]
fn walk_error_after_discovery() -> Result<(), E> {
    let usecase = UseCase::named(&[("a.txt", b"hello"), ("b.txt", b""), ("c.txt", b"c")])?;
    let paths = vec![
        Ok(usecase.files[0].clone()),
        Ok(usecase.files[1].clone()),
        Err(walker::E::IOError(
            usecase.root.join("locked"),
            io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        )),
        Ok(usecase.files[2].clone()),
    ];
    let memory = Memory::new();
    let result = Options::new()
        .workers(2)?
        .pipeline()?
        .feed(paths, memory.clone());
    assert!(matches!(result, Err(E::Walker(walker::E::IOError(..)))));
    assert_eq!(
        memory.digests(),
        HashMap::from([
            (usecase.files[0].clone(), SHA256_HELLO.to_owned()),
            (usecase.files[1].clone(), SHA256_EMPTY.to_owned()),
        ])
    );
    assert_eq!(memory.announced().len(), 2);
    usecase.clean()?;
    Ok(())
}
