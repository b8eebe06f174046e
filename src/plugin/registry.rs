//! The process-wide plugin registry.
//!
//! Keyed by `(Frame, Stage)`; each slot holds plugin factories in
//! registration order. The first-party plugins install themselves on first
//! touch; embedders may append their own with [`register`]. Lookup does not
//! walk any model hierarchy: a plugin that applies to several frames is
//! registered under each.
use super::cache::ParseCache;
use super::{
    FortinetFortiGateKVDecoderPlugin, GenericCEFDecoderPlugin, GenericJSONDecoderPlugin,
    GenericKVDecoderPlugin, GenericLEEF1DecoderPlugin, GenericLEEF2DecoderPlugin,
    PaloAltoNGFWCSVDecoder, GenericXMLDecoderPlugin, PluginFactory, Stage,
};
use crate::message::{Frame, SyslogMessage};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::RwLock;

struct Registration {
    name: String,
    factory: PluginFactory,
}

type RegistryMap = HashMap<(Frame, Stage), Vec<Registration>>;

static REGISTRY: Lazy<RwLock<RegistryMap>> = Lazy::new(|| {
    let mut map = RegistryMap::new();
    install_defaults(&mut map);
    RwLock::new(map)
});

fn add(map: &mut RegistryMap, frame: Frame, stage: Stage, factory: PluginFactory) {
    let name = factory().name();
    let slot = map.entry((frame, stage)).or_default();
    if slot.iter().all(|registration| registration.name != name) {
        slot.push(Registration { name, factory });
    }
}

fn install_defaults(map: &mut RegistryMap) {
    // Vendor dialects that identify themselves without generic probing.
    add(map, Frame::Base, Stage::SecondPass, || {
        Box::new(FortinetFortiGateKVDecoderPlugin)
    });
    add(map, Frame::Rfc3164, Stage::SecondPass, || {
        Box::new(PaloAltoNGFWCSVDecoder)
    });
    add(map, Frame::Rfc5424, Stage::SecondPass, || {
        Box::new(PaloAltoNGFWCSVDecoder)
    });

    // Format-recognising generics; the order encodes precedence.
    for frame in [Frame::Base, Frame::Rfc3164, Frame::Rfc5424] {
        add(map, frame, Stage::UnprocessedStructured, || {
            Box::new(GenericCEFDecoderPlugin)
        });
        add(map, frame, Stage::UnprocessedStructured, || {
            Box::new(GenericLEEF1DecoderPlugin)
        });
        add(map, frame, Stage::UnprocessedStructured, || {
            Box::new(GenericLEEF2DecoderPlugin)
        });
        add(map, frame, Stage::UnprocessedStructured, || {
            Box::new(GenericXMLDecoderPlugin)
        });
        add(map, frame, Stage::UnprocessedStructured, || {
            Box::new(GenericJSONDecoderPlugin)
        });
        add(map, frame, Stage::UnprocessedStructured, || {
            Box::new(GenericKVDecoderPlugin)
        });
    }
}

/// Register a plugin factory for a frame and stage.
///
/// Order-preserving and idempotent: registering a plugin already present
/// under the same key (by identity) is a no-op.
pub fn register(frame: Frame, stage: Stage, factory: PluginFactory) {
    if let Ok(mut map) = REGISTRY.write() {
        add(&mut map, frame, stage, factory);
    }
}

/// The identities registered under a frame and stage, in execution order.
pub fn registered_plugins(frame: Frame, stage: Stage) -> Vec<String> {
    REGISTRY
        .read()
        .map(|map| {
            map.get(&(frame, stage))
                .map(|slot| {
                    slot.iter()
                        .map(|registration| registration.name.clone())
                        .collect()
                })
                .unwrap_or_default()
        })
        .unwrap_or_default()
}

/// Run the plugin pipeline for a freshly decoded record. The first plugin
/// to return `true` wins the whole run.
pub(crate) fn run_plugins(event: &mut SyslogMessage, cache: &mut ParseCache) {
    match event.message() {
        Some(message) if !message.is_empty() => {}
        _ => return,
    }

    let Ok(map) = REGISTRY.read() else {
        return;
    };

    for stage in Stage::ALL {
        let Some(slot) = map.get(&(event.frame, stage)) else {
            continue;
        };
        for registration in slot {
            let plugin = (registration.factory)();
            if plugin.decode(event, cache) {
                tracing::debug!(
                    plugin = %registration.name,
                    ?stage,
                    "message plugin matched"
                );
                return;
            }
        }
    }
}
