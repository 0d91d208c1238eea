// ---------------------------------------------------------------------------
// advice.rs — per-grade verdicts and improvement tips (French frontend copy)
// ---------------------------------------------------------------------------

use crate::models::Grade;

/// One-line verdict shown next to the grade.
pub fn message(grade: Grade) -> &'static str {
    match grade {
        Grade::A => "Votre site a un très faible impact, excellent !",
        Grade::B => "Bon score, quelques optimisations possibles.",
        Grade::C => "Impact moyen, plusieurs améliorations sont recommandées.",
        Grade::D => "Site lourd, impact élevé.",
        Grade::E => "Impact très fort, optimisation urgente.",
    }
}

/// Improvement tips for a grade, most impactful first.
pub fn tips(grade: Grade) -> &'static [&'static str] {
    match grade {
        Grade::A => &[
            "Maintenez vos images compressées et pensez à utiliser AVIF/WebP.",
            "Surveillez régulièrement le poids des pages après chaque nouvelle fonctionnalité.",
            "Activez la mise en cache longue durée pour les assets statiques.",
            "Continuez à préférez un hébergement alimenté en énergie renouvelable.",
        ],
        Grade::B => &[
            "Compressez davantage les images d'arrière-plan et les héros.",
            "Activez la minification et la compression gzip/brotli sur vos scripts.",
            "Chargez les polices en mode swap et limitez leur nombre.",
            "Retardez le chargement des scripts qui ne sont pas critiques.",
        ],
        Grade::C => &[
            "Réduisez les animations et librairies lourdes non utilisées.",
            "Combinez ou supprimez les scripts tiers non indispensables.",
            "Activez le lazy-loading sur toutes les images en dessous de la ligne de flottaison.",
            "Servez les vidéos via un lecteur externe optimisé plutôt qu'en autoplay.",
        ],
        Grade::D => &[
            "Optimisez ou remplacez les images supérieures à 1200px par des versions responsives.",
            "Implémentez un système de cache/CDN pour réduire les requêtes répétées.",
            "Supprimez les scripts inutilisés et fractionnez votre bundle JavaScript.",
            "Réduisez la taille des CSS en supprimant les classes non utilisées.",
        ],
        Grade::E => &[
            "Auditez chaque page pour supprimer les assets non critiques immédiatement.",
            "Convertissez toutes les images en WebP/AVIF avec compression agressive.",
            "Désactivez les carrousels et animations lourdes sur mobile.",
            "Choisissez un hébergeur vert et activez la compression serveur.",
            "Appliquez un design plus simple afin de limiter le nombre de composants.",
        ],
    }
}

/// Tips joined the way the frontend consumes them ("; "-separated).
pub fn tips_joined(grade: Grade) -> String {
    tips(grade).join("; ")
}
