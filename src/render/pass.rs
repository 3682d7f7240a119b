use super::Element;
use crate::context::MatchContext;
use crate::errors::RouterResult;
use crate::router::Router;

#[derive(Debug)]
pub struct RenderOutcome<V> {
    pub views: Vec<V>,
    /// Navigations requested during the pass and applied after it.
    pub navigated: usize,
}

impl<V> RenderOutcome<V> {
    /// A navigation ran, so the views already describe a stale location.
    pub fn needs_rerender(&self) -> bool {
        self.navigated > 0
    }
}

/// Placeholder for output whose shape is only known once every route of the
/// pass has reported.
enum Slot<'a, V> {
    View(V),
    NotFound(MatchContext, &'a [Element<V>]),
}

/// Runs one render pass over `elements` against the router's current location.
///
/// The outermost pass starts from an empty subroute tree, so only routes it
/// reaches contribute to the not-found outcome. `NotFound` elements are
/// settled after the rest of the tree, wherever they are declared.
pub fn render<V>(router: &Router, elements: &[Element<V>]) -> RouterResult<RenderOutcome<V>> {
    let outermost = !router.navigator().is_rendering();
    let guard = router.navigator().begin_render();
    let root = router.root_context();
    if outermost {
        root.scope().tree().reset();
    }
    tracing::trace!(path = %root.full_path(), outermost, "render pass");

    let mut slots = Vec::new();
    render_into(&root, elements, &mut slots)?;

    let mut views = Vec::with_capacity(slots.len());
    settle(slots, &mut views)?;

    let navigated = guard.finish();
    Ok(RenderOutcome { views, navigated })
}

fn render_into<'a, V>(
    context: &MatchContext,
    elements: &'a [Element<V>],
    slots: &mut Vec<Slot<'a, V>>,
) -> RouterResult<()> {
    for element in elements {
        match element {
            Element::Route { route, children } => {
                if let Some(child) = route.resolve(context)? {
                    render_into(&child, children, slots)?;
                }
            }
            Element::Content(render) => slots.push(Slot::View(render(context))),
            Element::NotFound(children) => slots.push(Slot::NotFound(context.clone(), children)),
            Element::Redirect(request) => context.navigator().request(request.clone()),
            Element::Fragment(children) => render_into(context, children, slots)?,
        }
    }
    Ok(())
}

fn settle<V>(slots: Vec<Slot<'_, V>>, views: &mut Vec<V>) -> RouterResult<()> {
    for slot in slots {
        match slot {
            Slot::View(view) => views.push(view),
            Slot::NotFound(context, children) => {
                if !context.is_not_found() {
                    continue;
                }
                let mut nested = Vec::new();
                render_into(&context, children, &mut nested)?;
                settle(nested, views)?;
            }
        }
    }
    Ok(())
}
