// ABOUTME: Image lifecycle: pull from a registry or build from a fetched context.
// ABOUTME: Idempotent against a pre-existing image of the same name.

use tracing::info;

use crate::build_context;
use crate::build_context::ResourceLoader;
use crate::config::{ImageProperties, ImageSource};
use crate::engine::traits::{Engine, ImageError};
use crate::engine::{ClientFactory, OperationContext, SettingsSource, resolve_engine};
use crate::error::{Error, Result};
use crate::state::keys;
use crate::types::ImageId;

/// Resolve or produce the node's image and persist its identifier.
///
/// An image of the target name already known to the engine short-circuits the
/// pull or build; create is safe to re-enter.
pub async fn create_image(
    factory: &dyn ClientFactory,
    ctx: &OperationContext<'_>,
    from: SettingsSource,
    loader: &dyn ResourceLoader,
) -> Result<()> {
    let instance = ctx.instance;
    let props: ImageProperties = instance.declared()?;
    let source = props.source(instance.node_name())?;
    let engine = resolve_engine(factory, ctx, from).await?;

    let name = match &source {
        ImageSource::Pull { name } => name.clone(),
        ImageSource::Build { name, .. } => name.clone(),
    };

    let id = match engine.resolve_image(&name).await? {
        Some(id) => id,
        None => match &source {
            ImageSource::Pull { name } => pull(engine.as_ref(), name).await?,
            ImageSource::Build { name, dockerfile } => {
                build(engine.as_ref(), loader, name, dockerfile).await?
            }
        },
    };

    instance.runtime().set(keys::IMAGE, &id)
}

async fn pull(engine: &dyn Engine, name: &str) -> Result<ImageId> {
    info!(image = name, "pulling image");
    engine.pull_image(name).await?;
    engine
        .resolve_image(name)
        .await?
        .ok_or_else(|| ImageError::PullFailed(format!("{name} not present after pull")).into())
}

async fn build(
    engine: &dyn Engine,
    loader: &dyn ResourceLoader,
    name: &str,
    dockerfile: &str,
) -> Result<ImageId> {
    let context = build_context::assemble(loader, dockerfile)?;
    info!(image = name, context = dockerfile, "building image");
    engine.build_image(name, context.path()).await?;
    // An engine can report a successful build with no resulting image; that
    // is a build failure even without a raised error.
    let id = engine
        .resolve_image(name)
        .await?
        .ok_or_else(|| Error::BuildProducedNoImage {
            name: name.to_string(),
        })?;
    info!(image = %id, "built image");
    Ok(id)
}

/// Remove the image persisted by create, unless the node declares `keep`.
pub async fn delete_image(
    factory: &dyn ClientFactory,
    ctx: &OperationContext<'_>,
    from: SettingsSource,
) -> Result<()> {
    let instance = ctx.instance;
    let props: ImageProperties = instance.declared()?;
    if props.keep {
        return Ok(());
    }
    let image: ImageId = instance.runtime_require(keys::IMAGE)?;
    let engine = resolve_engine(factory, ctx, from).await?;
    engine.remove_image(&image, false).await?;
    Ok(())
}
