use crate::{
    pool::MAX_WORKERS,
    test::{get_stress_iterations_count, usecase::*, utils::*},
    walker, Options, E,
};
use std::{iter, path::PathBuf};

use super::COMPLETE;

fn check_workers(usecase: &UseCase, workers: usize) -> Result<(), E> {
    let (summary, memory) = run(usecase, workers)?;
    assert_eq!(summary.processed.len(), workers);
    assert_eq!(summary.processed.iter().sum::<usize>(), usecase.files.len());
    assert_eq!(summary.discovered, usecase.files.len());
    assert_eq!(memory.count(), usecase.files.len());
    assert_eq!(memory.digests(), usecase.digests()?);
    assert_eq!(summary.stages, COMPLETE);
    Ok(())
}

#[test]
fn with_one_worker() -> Result<(), E> {
    let usecase = UseCase::unnamed(2, 5, 2)?;
    check_workers(&usecase, 1)?;
    usecase.clean()?;
    Ok(())
}

#[test]
fn with_four_workers() -> Result<(), E> {
    let usecase = UseCase::unnamed(2, 5, 2)?;
    check_workers(&usecase, 4)?;
    usecase.clean()?;
    Ok(())
}

#[test]
fn with_more_workers_than_files() -> Result<(), E> {
    let usecase = UseCase::unnamed(2, 5, 1)?;
    check_workers(&usecase, 64)?;
    usecase.clean()?;
    Ok(())
}

#[test]
fn no_files_any_workers() -> Result<(), E> {
    for workers in [1, 4, 64] {
        let memory = Memory::new();
        let summary = Options::new()
            .workers(workers)?
            .pipeline()?
            .feed(iter::empty::<Result<PathBuf, walker::E>>(), memory.clone())?;
        assert_eq!(summary.discovered, 0);
        assert_eq!(summary.processed, vec![0; workers]);
        assert_eq!(summary.stages, COMPLETE);
        assert_eq!(memory.count(), 0);
    }
    Ok(())
}

#[test]
fn ten_thousand_paths() -> Result<(), E> {
    let usecase = UseCase::named(&[("hello.txt", b"hello")])?;
    let path = usecase.files[0].clone();
    let memory = Memory::new();
    let summary = Options::new().workers(64)?.pipeline()?.feed(
        iter::repeat(path).take(10_000).map(Ok::<PathBuf, walker::E>),
        memory.clone(),
    )?;
    assert_eq!(summary.discovered, 10_000);
    assert_eq!(summary.hashed, 10_000);
    assert_eq!(summary.processed.iter().sum::<usize>(), 10_000);
    assert_eq!(memory.count(), 10_000);
    assert_eq!(summary.stages, COMPLETE);
    usecase.clean()?;
    Ok(())
}

#[test]
fn queue_capacity() -> Result<(), E> {
    let usecase = UseCase::unnamed(2, 5, 1)?;
    for capacity in [0, 1, 16, 1024] {
        let memory = Memory::new();
        let summary = Options::new()
            .root(&usecase.root)
            .workers(3)?
            .capacity(capacity)
            .pipeline()?
            .run(memory.clone())?;
        assert_eq!(summary.discovered, usecase.files.len());
        assert_eq!(summary.stages, COMPLETE);
        assert_eq!(memory.digests(), usecase.digests()?);
    }
    usecase.clean()?;
    Ok(())
}

#[test]
fn stress() -> Result<(), E> {
    let usecase = UseCase::unnamed(3, 4, 2)?;
    let expected = usecase.digests()?;
    for i in 0..get_stress_iterations_count() {
        let (summary, memory) = run(&usecase, 1 + i % 8)?;
        assert_eq!(summary.stages, COMPLETE);
        assert_eq!(memory.digests(), expected);
    }
    usecase.clean()?;
    Ok(())
}

#[test]
fn workers_opt_min() {
    assert!(matches!(
        Options::new().workers(0),
        Err(E::InvalidWorkersNumber(0, MAX_WORKERS))
    ));
}

#[test]
fn workers_opt_max() {
    assert!(Options::new().workers(MAX_WORKERS).is_ok());
    assert!(Options::new().workers(MAX_WORKERS + 1).is_err());
}

#[test]
fn workers_by_default() -> Result<(), E> {
    let pipeline = Options::new().pipeline()?;
    assert!(pipeline.workers() >= 1);
    assert!(pipeline.workers() <= MAX_WORKERS);
    Ok(())
}
